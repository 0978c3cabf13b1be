//! Evergreen Runtime - Frame loop infrastructure
//!
//! Provides the per-frame building blocks shared by every animated part:
//! - `FrameClock` — wall-clock or headless frame timing
//! - `FrameContext` / `ExplodeTrigger` — the read-only per-frame view of the
//!   single "exploded" trigger
//! - `TapGesture` — tap vs. drag disambiguation for pointer input
//! - `CardEvent` / `EventBus` — typed event queue for audio and overlay consumers
//! - `FrameSystem` — trait for parts advanced once per rendered frame

mod clock;
mod event;
mod event_bus;
mod frame;
mod input;
mod system;

pub use clock::FrameClock;
pub use event::CardEvent;
pub use event_bus::EventBus;
pub use frame::{ExplodeTrigger, FrameContext};
pub use input::{TapGesture, DRAG_THRESHOLD_PX};
pub use system::FrameSystem;
