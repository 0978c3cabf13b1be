//! Wish provider trait and request type

use evergreen_core::Result;
use serde::{Deserialize, Serialize};

/// What to ask the provider for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishRequest {
    pub recipient: String,
    pub language: String,
    pub max_words: u32,
    pub tone: String,
}

impl Default for WishRequest {
    fn default() -> Self {
        crate::config::WishConfig::default().request()
    }
}

impl WishRequest {
    /// The prompt sent to text-generation providers
    pub fn build_prompt(&self) -> String {
        format!(
            "Write a short, luxurious, and warm Christmas wish in {} (max {} words).\n\
             Target Audience: \"{}\".\n\
             Tone: {}\n\
             Output JSON only.",
            self.language, self.max_words, self.recipient, self.tone
        )
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
    NoApiKey,
}

/// Trait implemented by each wish provider (Gemini, Mock)
pub trait WishProvider: Send + Sync {
    /// Provider name (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    /// Check if the provider can be called (API key set)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Generate a wish synchronously. An empty string means the provider
    /// answered without a wish.
    fn generate(&self, request: &WishRequest) -> Result<String>;
}
