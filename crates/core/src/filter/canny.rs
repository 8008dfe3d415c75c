//! Canny edge detection: Sobel gradients, 4-direction non-maximum
//! suppression, and dual-threshold hysteresis linking.
//!
//! Gradient magnitude is the L1 norm `|gx| + |gy|`, so the thresholds
//! carry the same meaning as OpenCV's defaults. Border handling clamps
//! in gradient computation and skips the outermost 1-pixel frame in
//! suppression.

use crate::filter::context::GradientScratch;

const TAN_22_5_DEG: f32 = 0.41421356;

/// Edge-map pixel values: definite edge, weak candidate awaiting
/// linking, background.
const EDGE: u8 = 255;
const CANDIDATE: u8 = 1;

/// Detect edges in a single-channel image, writing 255/0 into `edges`.
///
/// Pixels with magnitude above `high` seed the edge set; pixels between
/// `low` and `high` survive only when 8-connected to a seed. All
/// intermediate storage comes from `scratch`, which is resized lazily
/// and reused across calls.
pub fn canny(
    gray: &[u8],
    width: usize,
    height: usize,
    low: f32,
    high: f32,
    edges: &mut [u8],
    scratch: &mut GradientScratch,
) {
    debug_assert_eq!(gray.len(), width * height);
    debug_assert_eq!(edges.len(), width * height);

    edges.fill(0);
    if width < 3 || height < 3 {
        return;
    }

    scratch.resize(width * height);
    scratch.stack.clear();
    sobel_gradients(gray, width, height, scratch);
    suppress_and_threshold(width, height, low, high, edges, scratch);
    link_candidates(width, height, edges, &mut scratch.stack);

    for v in edges.iter_mut() {
        if *v == CANDIDATE {
            *v = 0;
        }
    }
}

/// Sobel 3x3 gradients with clamped borders; magnitude is `|gx| + |gy|`.
fn sobel_gradients(gray: &[u8], width: usize, height: usize, scratch: &mut GradientScratch) {
    for y in 0..height {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
        for x in 0..width {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(width - 1)];

            let sample = |xx: usize, yy: usize| f32::from(gray[yy * width + xx]);

            let left = sample(x_idx[0], y_idx[0])
                + 2.0 * sample(x_idx[0], y_idx[1])
                + sample(x_idx[0], y_idx[2]);
            let right = sample(x_idx[2], y_idx[0])
                + 2.0 * sample(x_idx[2], y_idx[1])
                + sample(x_idx[2], y_idx[2]);
            let top = sample(x_idx[0], y_idx[0])
                + 2.0 * sample(x_idx[1], y_idx[0])
                + sample(x_idx[2], y_idx[0]);
            let bottom = sample(x_idx[0], y_idx[2])
                + 2.0 * sample(x_idx[1], y_idx[2])
                + sample(x_idx[2], y_idx[2]);

            let gx = right - left;
            let gy = bottom - top;

            let idx = y * width + x;
            scratch.gx[idx] = gx;
            scratch.gy[idx] = gy;
            scratch.mag[idx] = gx.abs() + gy.abs();
        }
    }
}

/// Non-maximum suppression with dual-threshold classification.
///
/// Keeps a pixel when its magnitude is `>=` the leading neighbor and
/// `>` the trailing neighbor along the quantized gradient direction, so
/// exactly one side of a two-pixel plateau survives. Survivors above
/// `high` are marked `EDGE` and pushed as seeds; the rest become
/// `CANDIDATE`.
fn suppress_and_threshold(
    width: usize,
    height: usize,
    low: f32,
    high: f32,
    edges: &mut [u8],
    scratch: &mut GradientScratch,
) {
    for y in 1..height - 1 {
        let row = y * width;
        let mag_prev = &scratch.mag[row - width..row];
        let mag_row = &scratch.mag[row..row + width];
        let mag_next = &scratch.mag[row + width..row + 2 * width];

        for x in 1..width - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = scratch.gx[row + x];
            let gy = scratch.gy[row + x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (before, after) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            if mag < before || mag <= after {
                continue;
            }

            let idx = row + x;
            if mag > high {
                edges[idx] = EDGE;
                scratch.stack.push(idx);
            } else {
                edges[idx] = CANDIDATE;
            }
        }
    }
}

/// Flood from seed pixels, promoting 8-connected candidates to edges.
fn link_candidates(width: usize, height: usize, edges: &mut [u8], stack: &mut Vec<usize>) {
    while let Some(idx) = stack.pop() {
        let x = idx % width;
        let y = idx / width;
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let nidx = ny as usize * width + nx as usize;
                if edges[nidx] == CANDIDATE {
                    edges[nidx] = EDGE;
                    stack.push(nidx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical step: columns `< step_col` get `left`, the rest `right`.
    fn step_image(width: usize, height: usize, step_col: usize, left: u8, right: u8) -> Vec<u8> {
        let mut gray = vec![left; width * height];
        for y in 0..height {
            for x in step_col..width {
                gray[y * width + x] = right;
            }
        }
        gray
    }

    fn run(gray: &[u8], width: usize, height: usize, low: f32, high: f32) -> Vec<u8> {
        let mut edges = vec![0u8; width * height];
        let mut scratch = GradientScratch::default();
        canny(gray, width, height, low, high, &mut edges, &mut scratch);
        edges
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let gray = vec![128u8; 16 * 16];
        let edges = run(&gray, 16, 16, 100.0, 200.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_hard_step_marks_single_boundary_column() {
        // Sharp 0|255 step at column 8: L1 magnitude 1020 on both
        // boundary columns; suppression keeps exactly one of the tie.
        let gray = step_image(16, 16, 8, 0, 255);
        let edges = run(&gray, 16, 16, 100.0, 200.0);

        let mut marked_cols = std::collections::HashSet::new();
        for y in 0..16 {
            for x in 0..16 {
                if edges[y * 16 + x] == 255 {
                    marked_cols.insert(x);
                }
            }
        }
        assert_eq!(marked_cols.len(), 1, "plateau tie must resolve to one column");
        let col = *marked_cols.iter().next().unwrap();
        assert!((7..=8).contains(&col));

        // Every interior row crosses the boundary.
        for y in 1..15 {
            assert_eq!(edges[y * 16 + col], 255);
        }
    }

    #[test]
    fn test_gradient_below_low_is_ignored() {
        // Step contrast 20 gives magnitude 80, under low=100.
        let gray = step_image(16, 16, 8, 0, 20);
        let edges = run(&gray, 16, 16, 100.0, 200.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_weak_edge_without_seed_is_dropped() {
        // Step contrast 40 gives magnitude 160: above low, below high,
        // and nothing connects it to a strong pixel.
        let gray = step_image(16, 16, 8, 0, 40);
        let edges = run(&gray, 16, 16, 100.0, 200.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_weak_edge_linked_to_strong_survives() {
        // Top half: 0|255 step (strong). Bottom half: 0|40 step (weak)
        // along the same column. Hysteresis must carry the edge down.
        let width = 16;
        let height = 16;
        let mut gray = step_image(width, height, 8, 0, 255);
        for y in 8..height {
            for x in 8..width {
                gray[y * width + x] = 40;
            }
        }
        let edges = run(&gray, width, height, 100.0, 200.0);

        let weak_rows_marked = (11..height - 1)
            .filter(|&y| (7..=9).any(|x| edges[y * width + x] == 255))
            .count();
        assert!(
            weak_rows_marked > 0,
            "weak boundary pixels connected to strong ones must be kept"
        );
    }

    #[test]
    fn test_output_is_binary() {
        let gray = step_image(16, 16, 8, 0, 255);
        let edges = run(&gray, 16, 16, 100.0, 200.0);
        assert!(edges.iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn test_tiny_image_yields_no_edges() {
        let gray = vec![255u8; 2 * 2];
        let edges = run(&gray, 2, 2, 100.0, 200.0);
        assert!(edges.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_scratch_reuse_across_sizes() {
        let mut scratch = GradientScratch::default();
        let gray_a = step_image(16, 16, 8, 0, 255);
        let mut edges_a = vec![0u8; 16 * 16];
        canny(&gray_a, 16, 16, 100.0, 200.0, &mut edges_a, &mut scratch);

        let gray_b = step_image(8, 8, 4, 0, 255);
        let mut edges_b = vec![0u8; 8 * 8];
        canny(&gray_b, 8, 8, 100.0, 200.0, &mut edges_b, &mut scratch);

        assert!(edges_b.iter().any(|&v| v == 255));
    }
}
