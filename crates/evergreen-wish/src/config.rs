//! `[wish]` configuration table

use crate::provider::WishRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishConfig {
    /// Provider name passed to [`create_provider`](crate::create_provider)
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint override; the provider's default is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub model: String,
    pub recipient: String,
    pub language: String,
    pub max_words: u32,
    pub tone: String,
}

impl Default for WishConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key: None,
            api_url: None,
            model: "gemini-3-flash-preview".to_string(),
            recipient: "Little V (小V)".to_string(),
            language: "Simplified Chinese".to_string(),
            max_words: 25,
            tone: "Romantic, cinematic and warm. Focus on golden lights, eternity, \
                   warmth and the magic of the moment."
                .to_string(),
        }
    }
}

impl WishConfig {
    /// The request described by this config
    pub fn request(&self) -> WishRequest {
        WishRequest {
            recipient: self.recipient.clone(),
            language: self.language.clone(),
            max_words: self.max_words,
            tone: self.tone.clone(),
        }
    }

    /// API key, treating an empty string as missing
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}
