pub mod canny;
pub mod context;
pub mod edge_filter;
pub mod gaussian;
pub mod grayscale;
