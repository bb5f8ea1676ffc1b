use crate::core::errors::ConfigError;
use std::env;
use tracing::Level;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub log_level: Level,
}

/// Remote text/image provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub text_endpoint: String,
    pub image_endpoint: String,
    pub text_model: String,
    pub image_model: String,
    /// Per-attempt timeout for a text strategy request
    pub text_timeout_secs: u64,
    /// Timeout for the background image fetch
    pub image_timeout_secs: u64,
    /// Overall budget for the fetch-and-compose primary path
    pub image_budget_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Caption length validation bounds, per format
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    pub short_min: usize,
    pub short_max: usize,
    pub long_min: usize,
    pub long_max: usize,
}

impl CaptionConfig {
    /// (min, max) for the format. Min is exclusive, max inclusive.
    pub fn range(&self, format: crate::core::types::AdFormat) -> (usize, usize) {
        if format.is_short() {
            (self.short_min, self.short_max)
        } else {
            (self.long_min, self.long_max)
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderingConfig {
    pub font_dir: String,
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub caption: CaptionConfig,
    pub rendering: RenderingConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self::load_from_env();
        config.validate()?;
        Ok(config)
    }

    fn load_from_env() -> Self {
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|s| match s.to_lowercase().as_str() {
                "trace" => Some(Level::TRACE),
                "debug" => Some(Level::DEBUG),
                "info" => Some(Level::INFO),
                "warn" | "warning" => Some(Level::WARN),
                "error" => Some(Level::ERROR),
                _ => None,
            })
            .unwrap_or(Level::INFO);

        Self {
            server: ServerConfig {
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                log_level,
            },
            provider: ProviderConfig {
                text_endpoint: env::var("TEXT_ENDPOINT")
                    .unwrap_or_else(|_| "https://text.pollinations.ai".to_string()),
                image_endpoint: env::var("IMAGE_ENDPOINT")
                    .unwrap_or_else(|_| "https://image.pollinations.ai".to_string()),
                text_model: env::var("TEXT_MODEL").unwrap_or_else(|_| "openai".to_string()),
                image_model: env::var("IMAGE_MODEL").unwrap_or_else(|_| "flux".to_string()),
                text_timeout_secs: env::var("TEXT_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
                image_timeout_secs: env::var("IMAGE_FETCH_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
                image_budget_secs: env::var("IMAGE_BUDGET_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(90),
                connect_timeout_secs: env::var("CONNECT_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            caption: CaptionConfig {
                short_min: env::var("SHORT_CAPTION_MIN")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                short_max: env::var("SHORT_CAPTION_MAX")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(400),
                long_min: env::var("LONG_CAPTION_MIN")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
                long_max: env::var("LONG_CAPTION_MAX")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            },
            rendering: RenderingConfig {
                font_dir: env::var("FONT_DIR").unwrap_or_else(|_| "fonts".to_string()),
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("TEXT_ENDPOINT", &self.provider.text_endpoint)?;
        validate_endpoint("IMAGE_ENDPOINT", &self.provider.image_endpoint)?;

        for (name, secs) in [
            ("TEXT_TIMEOUT_SECONDS", self.provider.text_timeout_secs),
            ("IMAGE_FETCH_TIMEOUT_SECONDS", self.provider.image_timeout_secs),
            ("IMAGE_BUDGET_SECONDS", self.provider.image_budget_secs),
            ("CONNECT_TIMEOUT_SECONDS", self.provider.connect_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout { name });
            }
        }

        if self.caption.short_min >= self.caption.short_max {
            return Err(ConfigError::InvalidCaptionBounds {
                format: "short",
                min: self.caption.short_min,
                max: self.caption.short_max,
            });
        }
        if self.caption.long_min >= self.caption.long_max {
            return Err(ConfigError::InvalidCaptionBounds {
                format: "long",
                min: self.caption.long_min,
                max: self.caption.long_max,
            });
        }

        Ok(())
    }
}

/// Endpoints must be absolute http(s) URLs that can take extra path
/// segments (the prompt is pushed as a segment at request time).
fn validate_endpoint(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(value).map_err(|e| ConfigError::InvalidEndpoint {
        name,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint {
            name,
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEndpoint {
            name,
            reason: "URL cannot carry path segments".to_string(),
        });
    }
    Ok(())
}

// Note: No Default implementation because Config::new() can fail
// Users should explicitly call Config::new()? and handle errors
