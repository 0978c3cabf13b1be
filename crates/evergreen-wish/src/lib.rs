//! Evergreen Wish - Personalized wish text
//!
//! Fetches a short festive wish from a text-generation provider without ever
//! failing the card:
//! - `WishProvider` — provider trait (Gemini, Mock)
//! - `resolve_wish` — fallback policy; always yields displayable text
//! - `WishJob` — runs a request on a background thread, polled per frame

pub mod config;
pub mod fallback;
pub mod job;
pub mod provider;
pub mod providers;

pub use config::WishConfig;
pub use fallback::{resolve_wish, EMPTY_FALLBACK, FAILURE_FALLBACK, MISSING_KEY_FALLBACK};
pub use job::WishJob;
pub use provider::{ProviderStatus, WishProvider, WishRequest};
pub use providers::{available_providers, create_provider};
