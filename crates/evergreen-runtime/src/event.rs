//! Card events

/// Something that happened during a card session that other systems react to
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    /// The tree was tapped and started scattering
    Exploded,
    /// The user asked to see the tree again
    Reset,
    /// The wish card became visible
    MessageRevealed,
    /// Wish text finished generating (or fell back)
    WishReady(String),
    /// Sound effects were muted or unmuted
    MuteChanged(bool),
}
