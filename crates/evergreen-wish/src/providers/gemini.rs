//! Google Gemini text provider
//!
//! One blocking `generateContent` call per wish, asking for a JSON object
//! `{ "wish": "..." }`. There is no retry; a failed call becomes the failure
//! fallback upstream.

use crate::config::WishConfig;
use crate::provider::{ProviderStatus, WishProvider, WishRequest};
use evergreen_core::{EvergreenError, Result};
use serde_json::{json, Value};

const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider from config. A missing key is not an error here; it
    /// is reported through `health_check`.
    pub fn from_config(config: &WishConfig) -> Self {
        Self {
            api_key: config.api_key().map(str::to_string),
            api_url: config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    fn payload(request: &WishRequest) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": request.build_prompt() }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "wish": {
                            "type": "STRING",
                            "description": "The Christmas wish text."
                        }
                    }
                }
            }
        })
    }
}

/// Pull the wish out of a `generateContent` response body.
///
/// Missing text or a missing `wish` field yields an empty string; text that
/// is not JSON is an error.
pub fn parse_response(body: &Value) -> Result<String> {
    let text = body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("{}");

    let inner: Value = serde_json::from_str(text)
        .map_err(|e| EvergreenError::WishError(format!("Gemini returned malformed JSON: {e}")))?;

    Ok(inner
        .get("wish")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

impl WishProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        match self.api_key {
            Some(_) => Ok(ProviderStatus::Available),
            None => Ok(ProviderStatus::NoApiKey),
        }
    }

    fn generate(&self, request: &WishRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            EvergreenError::WishError(
                "Gemini API key not configured. Set EVERGREEN_GEMINI_API_KEY or add to .evergreen/config.toml"
                    .to_string(),
            )
        })?;

        let agent = ureq::Agent::new_with_defaults();
        let mut response = agent
            .post(&self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .send_json(Self::payload(request))
            .map_err(|e| EvergreenError::WishError(format!("Gemini API request failed: {e}")))?;

        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|e| EvergreenError::WishError(format!("Failed to read Gemini response: {e}")))?;

        parse_response(&body)
    }
}
