// Endpoint-level tests with both providers pointed at an unroutable
// address, so every upstream call fails fast and the local fallbacks
// answer instead.

use adforge::core::config::{
    CaptionConfig, Config, ProviderConfig, RenderingConfig, ServerConfig,
};
use adforge::{create_router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: tracing::Level::INFO,
        },
        provider: ProviderConfig {
            text_endpoint: "http://127.0.0.1:1".to_string(),
            image_endpoint: "http://127.0.0.1:1".to_string(),
            text_model: "openai".to_string(),
            image_model: "flux".to_string(),
            text_timeout_secs: 2,
            image_timeout_secs: 2,
            image_budget_secs: 5,
            connect_timeout_secs: 1,
        },
        caption: CaptionConfig {
            short_min: 10,
            short_max: 400,
            long_min: 30,
            long_max: 1000,
        },
        rendering: RenderingConfig {
            font_dir: "fonts".to_string(),
        },
    }
}

fn app() -> Router {
    let state = AppState::from_config(Arc::new(test_config())).expect("state");
    create_router(state)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn root_reports_liveness() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Animal Feed Ad Generator API is running!");
}

#[tokio::test]
async fn health_reports_version() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn generate_ad_requires_product() {
    let response = app()
        .oneshot(post_json("/generate-ad", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Product description is required");
}

#[tokio::test]
async fn generate_ad_rejects_blank_product() {
    let response = app()
        .oneshot(post_json(
            "/generate-ad",
            serde_json::json!({"product": "   "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_ad_falls_back_to_template_when_provider_is_down() {
    let response = app()
        .oneshot(post_json(
            "/generate-ad",
            serde_json::json!({"product": "Premium Layer Mash", "format": "short"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["model"], "template");
    let caption = body["caption"].as_str().unwrap();
    assert!(!caption.is_empty());
    assert!(caption.contains("Premium Layer Mash"));
}

#[tokio::test]
async fn generate_ad_long_format_template_fallback() {
    let response = app()
        .oneshot(post_json(
            "/generate-ad",
            serde_json::json!({"product": "Dairy Meal"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["model"], "template");
    assert!(body["caption"].as_str().unwrap().contains("Dairy Meal"));
}

#[tokio::test]
async fn generate_image_requires_product() {
    let response = app()
        .oneshot(post_json(
            "/generate-image",
            serde_json::json!({"product": "", "adText": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Product name is required");
}

#[tokio::test]
async fn generate_image_requires_ad_text() {
    let response = app()
        .oneshot(post_json(
            "/generate-image",
            serde_json::json!({"product": "Layer Mash"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Ad text is required");
}

#[tokio::test]
async fn generate_image_degrades_to_gradient_when_provider_is_down() {
    let response = app()
        .oneshot(post_json(
            "/generate-image",
            serde_json::json!({
                "product": "Premium Layer Mash",
                "adText": "Golden eggs start here!\nOrder today."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["model"], "fallback-gradient");
    assert_eq!(body["animalType"], "chickens");
    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn generate_image_animal_type_matches_classifier() {
    let response = app()
        .oneshot(post_json(
            "/generate-image",
            serde_json::json!({"product": "Beef Booster", "adText": "Stronger herds."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["animalType"],
        adforge::classifier::classify("Beef Booster").label()
    );
}
