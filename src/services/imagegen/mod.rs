// Background fetch and creative composition.
//
// The remote image provider is treated as an opaque capability that
// may be slow, malformed, or down. Every failure on the primary path
// (fetch, decode, compose, budget expiry) degrades to the local
// gradient fallback; the caller never sees a provider error.

use anyhow::{Context, Result};
use image::DynamicImage;
use reqwest::{header, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::core::errors::{FetchError, FetchResult};
use crate::core::types::{ComposedImage, ImageSource};
use crate::services::classifier::AnimalCategory;
use crate::services::rendering::{compositor, TextRenderer};
use crate::services::PROVIDER_USER_AGENT;
use crate::utils::image_ops;

const CANVAS_SIZE: u32 = compositor::CANVAS_SIZE;

pub struct ImageGenerator {
    config: Arc<Config>,
    http: reqwest::Client,
    image_base: Url,
    renderer: Arc<TextRenderer>,
}

impl ImageGenerator {
    pub fn new(config: Arc<Config>, renderer: Arc<TextRenderer>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.image_timeout_secs))
            .connect_timeout(Duration::from_secs(config.provider.connect_timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client")?;

        let image_base = Url::parse(&config.provider.image_endpoint)
            .context("Invalid image provider endpoint")?;

        Ok(Self {
            config,
            http,
            image_base,
            renderer,
        })
    }

    /// Produce the composed creative for a product and its caption.
    ///
    /// The fetch-and-compose primary path runs under the configured
    /// budget; any failure or expiry degrades to the gradient
    /// fallback. Only encoding the final PNG can error out.
    pub async fn generate(
        &self,
        product: &str,
        animal: AnimalCategory,
        ad_text: &str,
    ) -> Result<ComposedImage> {
        let budget = Duration::from_secs(self.config.provider.image_budget_secs);

        match tokio::time::timeout(budget, self.composited(product, animal, ad_text)).await {
            Ok(Ok(data_uri)) => {
                info!(animal = animal.label(), "composed creative over generated background");
                return Ok(ComposedImage {
                    data_uri,
                    source: ImageSource::RemoteComposited,
                });
            }
            Ok(Err(err)) => {
                warn!("background path failed, using gradient fallback: {err}");
            }
            Err(_) => {
                warn!(
                    "background path exceeded {}s budget, using gradient fallback",
                    self.config.provider.image_budget_secs
                );
            }
        }

        self.fallback(product, animal, ad_text).await
    }

    /// Primary path: fetch a generated background and compose over it.
    async fn composited(
        &self,
        product: &str,
        animal: AnimalCategory,
        ad_text: &str,
    ) -> Result<String> {
        let prompt = background_prompt(product, animal);
        let background = self.fetch_background(&prompt).await?;

        let renderer = Arc::clone(&self.renderer);
        let text = ad_text.to_string();
        let composed = tokio::task::spawn_blocking(move || {
            compositor::compose_over_background(&renderer, &background, &text)
        })
        .await
        .context("compose task failed")??;

        image_ops::encode_png_data_uri_async(DynamicImage::ImageRgba8(composed)).await
    }

    /// Degraded path: local gradient creative. Only PNG encoding can
    /// fail here, which surfaces as an internal error.
    async fn fallback(
        &self,
        product: &str,
        animal: AnimalCategory,
        ad_text: &str,
    ) -> Result<ComposedImage> {
        let renderer = Arc::clone(&self.renderer);
        let product = product.to_string();
        let text = ad_text.to_string();
        let composed = tokio::task::spawn_blocking(move || {
            compositor::compose_fallback(&renderer, &product, animal, &text)
        })
        .await
        .context("fallback compose task failed")?;

        let data_uri =
            image_ops::encode_png_data_uri_async(DynamicImage::ImageRgba8(composed)).await?;
        info!(animal = animal.label(), "composed gradient fallback creative");
        Ok(ComposedImage {
            data_uri,
            source: ImageSource::FallbackGradient,
        })
    }

    /// Fetch raw background bytes from the image provider.
    async fn fetch_background(&self, prompt: &str) -> FetchResult<Vec<u8>> {
        let seed: u64 = rand::random();
        let mut url = self.image_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidEndpoint)?
            .push("prompt")
            .push(prompt);
        url.query_pairs_mut()
            .append_pair("width", &CANVAS_SIZE.to_string())
            .append_pair("height", &CANVAS_SIZE.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", "true")
            .append_pair("model", &self.config.provider.image_model)
            .append_pair("enhance", "true");

        debug!(%url, "fetching generated background");
        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, PROVIDER_USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Image-generation prompt: product, inferred animal, fixed style suffix
pub fn background_prompt(product: &str, animal: AnimalCategory) -> String {
    format!(
        "Professional advertisement photo for {product} animal feed, farm setting with \
         healthy {}, bright natural lighting, commercial photography, vibrant colors, \
         high quality, 4K, realistic",
        animal.label()
    )
}
