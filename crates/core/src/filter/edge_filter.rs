use crate::filter::canny::canny;
use crate::filter::context::FilterContext;
use crate::filter::gaussian;
use crate::filter::grayscale;
use crate::shared::constants::{
    BLUR_KERNEL_SIZE, BLUR_SIGMA, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD,
};
use crate::shared::frame::FrameView;

/// Domain interface for in-place frame filters.
///
/// Implementations mutate the frame in place and draw all scratch
/// memory from the caller's [`FilterContext`], so one filter instance
/// serves any number of workers as long as each worker passes its own
/// context. Calls never fail: an empty frame is a no-op and anything
/// else is covered by the frame-view length contract.
pub trait FrameFilter: Send + Sync {
    fn process(&self, frame: &mut FrameView<'_>, ctx: &mut FilterContext);
}

/// The preview edge filter: RGBA → luma → Gaussian blur → Canny →
/// RGBA, overwriting the frame with an opaque edge visualization.
///
/// Dimensions never change across a call; only pixel content does.
pub struct EdgeFilter {
    kernel: Vec<f32>,
    low: f32,
    high: f32,
}

impl EdgeFilter {
    /// `kernel_size` must be odd; `low <= high` is expected but not
    /// enforced beyond its effect on hysteresis.
    pub fn new(kernel_size: usize, sigma: f64, low: f32, high: f32) -> Self {
        Self {
            kernel: gaussian::gaussian_kernel_1d(kernel_size, sigma),
            low,
            high,
        }
    }
}

impl Default for EdgeFilter {
    fn default() -> Self {
        Self::new(
            BLUR_KERNEL_SIZE,
            BLUR_SIGMA,
            CANNY_LOW_THRESHOLD,
            CANNY_HIGH_THRESHOLD,
        )
    }
}

impl FrameFilter for EdgeFilter {
    fn process(&self, frame: &mut FrameView<'_>, ctx: &mut FilterContext) {
        if frame.is_empty() {
            return;
        }

        let width = frame.width() as usize;
        let height = frame.height() as usize;
        ctx.ensure_sized(frame.width(), frame.height());

        grayscale::rgba_to_gray(frame.data(), &mut ctx.gray);
        gaussian::blur_with_kernel(&mut ctx.gray, width, height, &self.kernel, &mut ctx.blur_temp);
        canny(
            &ctx.gray,
            width,
            height,
            self.low,
            self.high,
            &mut ctx.edges,
            &mut ctx.grad,
        );
        grayscale::gray_to_rgba(&ctx.edges, frame.data_mut());
    }
}
