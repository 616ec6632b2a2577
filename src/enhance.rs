//! Optional rewriting of section text.
//!
//! Enhancement is best-effort by contract: [`enhance_or_original`] turns any
//! [`EnhanceError`] into the original text plus a recorded reason, so a
//! failing or unreachable service never aborts a run.

use crate::config::EnhanceConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("API key variable {0} is not set")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response contained no text")]
    EmptyResponse,
}

pub trait Enhancer {
    /// Rewrite `text`, which belongs to the section named `context`.
    fn enhance(&self, text: &str, context: &str) -> Result<String, EnhanceError>;
}

/// Returns text unchanged. Used when enhancement is disabled.
pub struct Passthrough;

impl Enhancer for Passthrough {
    fn enhance(&self, text: &str, _context: &str) -> Result<String, EnhanceError> {
        Ok(text.to_string())
    }
}

const SYSTEM_PROMPT: &str = "You are a content enhancement assistant. Improve the provided text \
by making it more engaging and professional while maintaining its original meaning.";

/// Enhancer backed by an OpenAI-compatible `chat/completions` endpoint.
pub struct ChatEnhancer {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatEnhancer {
    /// Build from config, reading the API key from the configured variable.
    pub fn from_config(config: &EnhanceConfig) -> Result<Self, EnhanceError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| EnhanceError::MissingApiKey(config.api_key_env.clone()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: chat_endpoint(&config.base_url),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn request_body(model: &str, max_tokens: u32, text: &str, context: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            {
                "role": "user",
                "content": format!("Enhance this content for the section '{context}': {text}"),
            },
        ],
    })
}

fn first_choice_text(response: ChatResponse) -> Result<String, EnhanceError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(EnhanceError::EmptyResponse)
}

impl Enhancer for ChatEnhancer {
    fn enhance(&self, text: &str, context: &str) -> Result<String, EnhanceError> {
        let response: ChatResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body(&self.model, self.max_tokens, text, context))
            .send()?
            .error_for_status()?
            .json()?;
        first_choice_text(response)
    }
}

/// Result of a best-effort enhancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhanced {
    pub text: String,
    /// Why the original text was kept, when enhancement failed.
    pub fallback: Option<String>,
}

pub fn enhance_or_original(enhancer: &dyn Enhancer, text: &str, context: &str) -> Enhanced {
    match enhancer.enhance(text, context) {
        Ok(enhanced) => Enhanced {
            text: enhanced,
            fallback: None,
        },
        Err(e) => Enhanced {
            text: text.to_string(),
            fallback: Some(e.to_string()),
        },
    }
}
