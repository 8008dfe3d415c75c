/// Gaussian smoothing applied before edge detection.
pub const BLUR_KERNEL_SIZE: usize = 5;
pub const BLUR_SIGMA: f64 = 1.5;

/// Hysteresis thresholds against the L1 gradient magnitude
/// (`|gx| + |gy|`), matching the classic OpenCV defaults.
pub const CANNY_LOW_THRESHOLD: f32 = 100.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 200.0;

/// All frames are 4-channel 8-bit RGBA.
pub const RGBA_CHANNELS: usize = 4;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
