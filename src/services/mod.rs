pub mod classifier;
pub mod imagegen;
pub mod rendering;
pub mod textgen;

/// User-Agent the remote providers expect on browserless calls
pub(crate) const PROVIDER_USER_AGENT: &str = "Mozilla/5.0";

// Re-export commonly used services
pub use imagegen::ImageGenerator;
pub use rendering::TextRenderer;
pub use textgen::TextGenerator;
