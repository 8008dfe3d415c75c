pub mod batch_executor;
pub mod filter_image_use_case;
pub mod filter_logger;
