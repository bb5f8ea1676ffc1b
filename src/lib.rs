// Library exports for the ad generation backend

pub mod core;
pub mod services;
pub mod utils;
pub mod web;

// Re-export commonly used types and functions
pub use core::{
    config::Config,
    errors::{ApiError, ComposeError, ConfigError, FetchError, GenerationError},
    types::{AdFormat, AdSource, AdText, ComposedImage, ImageSource},
};

pub use services::{classifier, ImageGenerator, TextGenerator, TextRenderer};

pub use web::{create_router, AppState};
