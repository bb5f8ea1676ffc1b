pub mod image_ops;

// Re-export commonly used items
pub use image_ops::{encode_png_async, encode_png_data_uri_async};
