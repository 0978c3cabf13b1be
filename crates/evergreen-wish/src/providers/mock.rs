//! Mock provider for tests and offline runs

use crate::provider::{ProviderStatus, WishProvider, WishRequest};
use evergreen_core::{EvergreenError, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Fixed(String),
    Fail,
    NoKey,
}

/// Answers without touching the network
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: Behavior,
    delay: Option<Duration>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::fixed("愿金色的星光照亮你的每一个冬夜。圣诞快乐。")
    }
}

impl MockProvider {
    /// Always answers `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fixed(text.into()),
            delay: None,
        }
    }

    /// Every generation fails
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            delay: None,
        }
    }

    /// Reports a missing API key
    pub fn without_key() -> Self {
        Self {
            behavior: Behavior::NoKey,
            delay: None,
        }
    }

    /// Sleep this long inside `generate`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl WishProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        match self.behavior {
            Behavior::NoKey => Ok(ProviderStatus::NoApiKey),
            _ => Ok(ProviderStatus::Available),
        }
    }

    fn generate(&self, _request: &WishRequest) -> Result<String> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match &self.behavior {
            Behavior::Fixed(text) => Ok(text.clone()),
            Behavior::Fail => Err(EvergreenError::WishError("mock failure".to_string())),
            Behavior::NoKey => Err(EvergreenError::WishError("no API key".to_string())),
        }
    }
}
