//! Edge-detection frame filter: RGBA → grayscale → Gaussian blur →
//! Canny → RGBA, applied in place on caller-owned pixel buffers.
//!
//! The filter itself is stateless; per-worker scratch memory lives in
//! an explicit [`filter::context::FilterContext`] passed into every
//! call, so concurrent workers never share mutable state.

pub mod filter;
pub mod io;
pub mod pipeline;
pub mod shared;
