//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod gemini;
pub mod mock;

use crate::config::WishConfig;
use crate::provider::WishProvider;
use evergreen_core::{EvergreenError, Result};
use std::sync::Arc;

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &WishConfig) -> Result<Arc<dyn WishProvider>> {
    match name {
        "mock" => Ok(Arc::new(mock::MockProvider::default())),
        "gemini" => Ok(Arc::new(gemini::GeminiProvider::from_config(config))),
        _ => Err(EvergreenError::WishError(format!(
            "Unknown provider '{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "gemini"]
}
