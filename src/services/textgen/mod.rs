// Ad copy generation against the remote text provider.
//
// The provider's HTTP contract is informal and has drifted before, so
// robustness comes from a fixed chain of known-working request shapes
// rather than retrying one shape. Strategies run strictly
// sequentially; the first response that survives cleanup + validation
// wins and the rest are skipped. When the whole chain fails, the
// template pool answers instead.

pub mod cleanup;
pub mod templates;

use anyhow::{Context, Result};
use reqwest::{header, Url};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::core::errors::{GenerationError, GenerationResult};
use crate::core::types::{AdFormat, AdSource, AdText};
use crate::services::PROVIDER_USER_AGENT;

const SYSTEM_PROMPT: &str = "You are a creative marketing expert for agricultural and \
     livestock businesses. Create compelling, concise advertisements. Return only the \
     ad text, no explanations.";

/// Chat-style request body (message-list shape)
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    model: String,
    seed: u64,
}

/// Bare-prompt request body
#[derive(Debug, Serialize)]
struct PromptRequest {
    prompt: String,
    model: String,
}

type BuildFn = fn(&TextGenerator, &str, u64) -> GenerationResult<reqwest::RequestBuilder>;

/// One attempt shape: a name for the logs plus a request builder.
struct Strategy {
    name: &'static str,
    build: BuildFn,
}

/// Fixed priority order; the order matters for fixture reproducibility.
static STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "url-prompt",
        build: build_url_prompt,
    },
    Strategy {
        name: "chat-messages",
        build: build_chat_messages,
    },
    Strategy {
        name: "bare-prompt",
        build: build_bare_prompt,
    },
];

pub struct TextGenerator {
    config: Arc<Config>,
    http: reqwest::Client,
    text_base: Url,
}

impl TextGenerator {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.text_timeout_secs))
            .connect_timeout(Duration::from_secs(config.provider.connect_timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client")?;

        let text_base = Url::parse(&config.provider.text_endpoint)
            .context("Invalid text provider endpoint")?;

        Ok(Self {
            config,
            http,
            text_base,
        })
    }

    /// Generate ad copy for a product. Total: exhausting the strategy
    /// chain falls back to the template pool.
    pub async fn generate(&self, product: &str, format: AdFormat) -> AdText {
        let prompt = instruction_prompt(product, format);
        let seed: u64 = rand::random();

        for strategy in &STRATEGIES {
            match self.attempt(strategy, &prompt, seed, format).await {
                Ok(body) => {
                    info!(strategy = strategy.name, "ad copy accepted from text provider");
                    return AdText {
                        body,
                        source: AdSource::Remote,
                    };
                }
                Err(err) => {
                    warn!(strategy = strategy.name, "text strategy failed: {err}");
                }
            }
        }

        info!("all text strategies failed, picking a template");
        templates::pick(product, format)
    }

    /// One strategy attempt: build, send, clean, validate.
    async fn attempt(
        &self,
        strategy: &Strategy,
        prompt: &str,
        seed: u64,
        format: AdFormat,
    ) -> GenerationResult<String> {
        debug!(strategy = strategy.name, "attempting text generation");
        let request = (strategy.build)(self, prompt, seed)?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(GenerationError::Status {
                status: response.status(),
            });
        }

        let raw = response.text().await?;
        let cleaned = cleanup::clean(&raw, format);
        cleanup::validate(&cleaned, format, &self.config.caption)
            .map_err(|reason| GenerationError::Rejected { reason })?;
        Ok(cleaned)
    }
}

/// Natural-language instruction sent to the provider, varying by format
fn instruction_prompt(product: &str, format: AdFormat) -> String {
    match format {
        AdFormat::Short => format!(
            "Write a 2-line catchy advertisement with emojis for animal feed product: \
             \"{product}\". Maximum 25 words. No hashtags. Just the ad text."
        ),
        AdFormat::Long => format!(
            "Create a compelling social media advertisement for animal feed product: \
             \"{product}\". Include emojis and farming hashtags. Keep it under 100 words. \
             Make it engaging for farmers."
        ),
    }
}

/// GET with the prompt percent-encoded into the URL path
fn build_url_prompt(
    gen: &TextGenerator,
    prompt: &str,
    seed: u64,
) -> GenerationResult<reqwest::RequestBuilder> {
    let mut url = gen.text_base.clone();
    url.path_segments_mut()
        .map_err(|_| GenerationError::InvalidEndpoint)?
        .push("prompt")
        .push(prompt);
    url.query_pairs_mut()
        .append_pair("model", &gen.config.provider.text_model)
        .append_pair("seed", &seed.to_string());
    Ok(gen
        .http
        .get(url)
        .header(header::ACCEPT, "text/plain")
        .header(header::USER_AGENT, PROVIDER_USER_AGENT))
}

/// POST with a system/user message list
fn build_chat_messages(
    gen: &TextGenerator,
    prompt: &str,
    seed: u64,
) -> GenerationResult<reqwest::RequestBuilder> {
    let body = ChatRequest {
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: prompt.to_string(),
            },
        ],
        model: gen.config.provider.text_model.clone(),
        seed,
    };
    Ok(gen.http.post(gen.text_base.clone()).json(&body))
}

/// POST with a bare prompt payload
fn build_bare_prompt(
    gen: &TextGenerator,
    prompt: &str,
    _seed: u64,
) -> GenerationResult<reqwest::RequestBuilder> {
    let body = PromptRequest {
        prompt: prompt.to_string(),
        model: gen.config.provider.text_model.clone(),
    };
    Ok(gen.http.post(gen.text_base.clone()).json(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompt_forbids_hashtags() {
        let prompt = instruction_prompt("Layer Mash", AdFormat::Short);
        assert!(prompt.contains("\"Layer Mash\""));
        assert!(prompt.contains("No hashtags"));
        assert!(prompt.contains("2-line"));
    }

    #[test]
    fn long_prompt_asks_for_hashtags() {
        let prompt = instruction_prompt("Layer Mash", AdFormat::Long);
        assert!(prompt.contains("\"Layer Mash\""));
        assert!(prompt.contains("hashtags"));
        assert!(prompt.contains("100 words"));
    }

    #[test]
    fn strategy_order_is_fixed() {
        let names: Vec<&str> = STRATEGIES.iter().map(|s| s.name).collect();
        assert_eq!(names, ["url-prompt", "chat-messages", "bare-prompt"]);
    }
}
