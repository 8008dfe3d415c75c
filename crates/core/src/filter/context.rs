use log::debug;

/// Scratch buffers for the gradient and hysteresis stages.
///
/// Fields are plain reusable vectors; contents are garbage between
/// filter calls.
#[derive(Default)]
pub struct GradientScratch {
    pub(crate) gx: Vec<f32>,
    pub(crate) gy: Vec<f32>,
    pub(crate) mag: Vec<f32>,
    pub(crate) stack: Vec<usize>,
}

impl GradientScratch {
    pub(crate) fn resize(&mut self, pixels: usize) {
        self.gx.resize(pixels, 0.0);
        self.gy.resize(pixels, 0.0);
        self.mag.resize(pixels, 0.0);
    }
}

/// Reusable scratch state for one filter worker.
///
/// Replaces hidden thread-local buffers with explicit context passing:
/// each worker owns one context and hands it to every
/// [`FrameFilter::process`](crate::filter::edge_filter::FrameFilter)
/// call. Buffers are sized lazily on first use and resized only when
/// the frame dimensions change, so steady-state frame processing
/// performs no allocation. The contents carry no semantic state;
/// dropping and recreating a context never changes results.
pub struct FilterContext {
    pub(crate) gray: Vec<u8>,
    pub(crate) edges: Vec<u8>,
    pub(crate) blur_temp: Vec<f32>,
    pub(crate) grad: GradientScratch,
    sized_for: Option<(u32, u32)>,
    reallocations: usize,
}

impl FilterContext {
    pub fn new() -> Self {
        Self {
            gray: Vec::new(),
            edges: Vec::new(),
            blur_temp: Vec::new(),
            grad: GradientScratch::default(),
            sized_for: None,
            reallocations: 0,
        }
    }

    /// Size every scratch buffer for a `width x height` frame.
    ///
    /// A no-op when the dimensions match the previous call.
    pub(crate) fn ensure_sized(&mut self, width: u32, height: u32) {
        if self.sized_for == Some((width, height)) {
            return;
        }
        let pixels = (width as usize) * (height as usize);
        debug!("sizing filter scratch for {width}x{height}");
        self.gray.resize(pixels, 0);
        self.edges.resize(pixels, 0);
        self.grad.resize(pixels);
        self.sized_for = Some((width, height));
        self.reallocations += 1;
    }

    /// Dimensions the scratch buffers were last sized for, if any.
    pub fn scratch_dims(&self) -> Option<(u32, u32)> {
        self.sized_for
    }

    /// How many times the scratch buffers have been (re)sized.
    ///
    /// Stays constant while consecutive frames share dimensions, which
    /// is the allocation-avoidance contract tests assert on.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new()
    }
}
