// HTTP surface: router, shared state, and the two generation handlers.
//
// Provider failures never reach this layer as errors; the services
// degrade internally. The only error responses here are missing
// required input (400) and genuinely unexpected faults (500).

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::core::config::Config;
use crate::core::errors::ApiError;
use crate::core::types::{AdFormat, AdRequestBody, AdResponse, ImageRequestBody, ImageResponse};
use crate::services::{classifier, ImageGenerator, TextGenerator, TextRenderer};

const ERR_PRODUCT_DESCRIPTION: &str = "Product description is required";
const ERR_PRODUCT_NAME: &str = "Product name is required";
const ERR_AD_TEXT: &str = "Ad text is required";
const ERR_IMAGE_FAILED: &str = "Failed to generate image. Please try again.";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub text: Arc<TextGenerator>,
    pub image: Arc<ImageGenerator>,
}

impl AppState {
    pub fn from_config(config: Arc<Config>) -> anyhow::Result<Self> {
        let renderer = Arc::new(TextRenderer::new(&config.rendering.font_dir));
        let text = Arc::new(TextGenerator::new(Arc::clone(&config))?);
        let image = Arc::new(ImageGenerator::new(Arc::clone(&config), renderer)?);
        Ok(Self {
            config,
            text,
            image,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/generate-ad", post(generate_ad))
        .route("/generate-image", post(generate_image))
        .with_state(state)
        .layer(cors)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Animal Feed Ad Generator API is running!"
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Generate ad copy for a product.
///
/// Total once input validation passes: the strategy chain falls back
/// to the template pool, so a provider outage still yields a 200.
async fn generate_ad(
    State(state): State<AppState>,
    Json(body): Json<AdRequestBody>,
) -> Result<Json<AdResponse>, ApiError> {
    let product = body.product.as_deref().map(str::trim).unwrap_or("");
    if product.is_empty() {
        return Err(ApiError::BadRequest(ERR_PRODUCT_DESCRIPTION));
    }

    let format = AdFormat::from_param(body.format.as_deref());
    info!("generating ad copy for {product:?} ({format:?})");

    let ad = state.text.generate(product, format).await;
    Ok(Json(AdResponse {
        caption: ad.body,
        model: ad.source.as_str(),
    }))
}

/// Compose the ad creative for a product and its caption.
async fn generate_image(
    State(state): State<AppState>,
    Json(body): Json<ImageRequestBody>,
) -> Result<Json<ImageResponse>, ApiError> {
    let product = body.product.as_deref().map(str::trim).unwrap_or("");
    if product.is_empty() {
        return Err(ApiError::BadRequest(ERR_PRODUCT_NAME));
    }
    let ad_text = body.ad_text.as_deref().map(str::trim).unwrap_or("");
    if ad_text.is_empty() {
        return Err(ApiError::BadRequest(ERR_AD_TEXT));
    }

    let animal = classifier::classify(product);
    info!(
        "generating creative for {product:?} (animal type: {})",
        animal.label()
    );

    let composed = state
        .image
        .generate(product, animal, ad_text)
        .await
        .map_err(|err| ApiError::internal(ERR_IMAGE_FAILED, err))?;

    Ok(Json(ImageResponse {
        image_url: composed.data_uri,
        model: composed.source.as_str(),
        animal_type: animal.label(),
    }))
}
