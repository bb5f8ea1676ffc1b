pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items for convenience
pub use config::Config;
pub use errors::{ApiError, ComposeError, ConfigError, FetchError, GenerationError};
pub use types::{AdFormat, AdSource, AdText, ComposedImage, ImageSource};
