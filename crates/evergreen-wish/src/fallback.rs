//! Fallback policy
//!
//! The card always shows some text. Provider problems are turned into one of
//! three fixed wishes here and never reach the caller.

use crate::provider::{ProviderStatus, WishProvider, WishRequest};
use tracing::{debug, warn};

/// Shown when no API key is configured
pub const MISSING_KEY_FALLBACK: &str = "星光静默（缺少API Key）。但愿你的节日依然闪耀。";
/// Shown when the provider answers without a wish
pub const EMPTY_FALLBACK: &str = "金色的流光在翡翠般的夜色中为你闪烁。";
/// Shown when the request fails
pub const FAILURE_FALLBACK: &str = "信号消逝在风雪中。圣诞快乐，小V。";

/// Ask `provider` for a wish, substituting a fallback on any problem.
pub fn resolve_wish(provider: &dyn WishProvider, request: &WishRequest) -> String {
    match provider.health_check() {
        Ok(ProviderStatus::Available) => {}
        Ok(ProviderStatus::NoApiKey) => {
            debug!("[wish] {}: no API key configured", provider.name());
            return MISSING_KEY_FALLBACK.to_string();
        }
        Ok(ProviderStatus::Unavailable(reason)) => {
            warn!("[wish] {} unavailable: {reason}", provider.name());
            return FAILURE_FALLBACK.to_string();
        }
        Err(e) => {
            warn!("[wish] {} health check failed: {e}", provider.name());
            return FAILURE_FALLBACK.to_string();
        }
    }

    match provider.generate(request) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                EMPTY_FALLBACK.to_string()
            } else {
                debug!("[wish] {} answered ({} chars)", provider.name(), text.chars().count());
                text.to_string()
            }
        }
        Err(e) => {
            warn!("[wish] {} generation failed: {e}", provider.name());
            FAILURE_FALLBACK.to_string()
        }
    }
}
