//! Frame system trait

use crate::frame::FrameContext;

/// A stateful part advanced once per rendered frame.
///
/// Systems own their state outright and only read the shared context, so the
/// order in which a host advances them does not matter.
pub trait FrameSystem {
    /// Advance by one frame
    fn advance(&mut self, ctx: &FrameContext);

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
