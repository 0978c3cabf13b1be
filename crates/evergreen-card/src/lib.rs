//! Evergreen Card - The interactive greeting card
//!
//! Glues the animated scene, sound effects and wish text into one session a
//! host drives with pointer input and a frame tick:
//! - `CardConfig` — layered `[scene]` / `[wish]` / `[audio]` / `[card]` configuration
//! - `CardSession` — input handling, explode trigger, message reveal, overlay state
//! - `logging::init_tracing` — `tracing` subscriber filtered by `EVERGREEN_LOG`

pub mod config;
pub mod logging;
pub mod session;

pub use config::{CardConfig, CardSection};
pub use session::{CardSession, OverlayState};
