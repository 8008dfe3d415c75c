/// Precompute a normalized 1-D Gaussian kernel.
///
/// `kernel_size` must be odd and >= 1; `sigma` must be positive.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    debug_assert!(sigma > 0.0);
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Separable Gaussian blur of a single-channel image, in place.
///
/// Border samples clamp to the nearest edge pixel. `temp` is resized to
/// `width * height` floats and reused across calls in hot paths.
pub fn blur_with_kernel(
    data: &mut [u8],
    width: usize,
    height: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = kernel_size / 2;

    temp.resize(width * height, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - half as isize)
                    .max(0)
                    .min((width - 1) as isize) as usize;
                sum += data[row + sx] as f32 * w;
            }
            temp[row + x] = sum;
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - half as isize)
                    .max(0)
                    .min((height - 1) as isize) as usize;
                sum += temp[sy * width + x] * w;
            }
            data[y * width + x] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }
}
