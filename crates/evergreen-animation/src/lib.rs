//! Animation units for the Evergreen card
//!
//! Every unit here owns its own state and is advanced once per frame with a
//! shared, read-only [`FrameContext`](evergreen_runtime::FrameContext):
//! - [`ExplosionUnit`] — scatters one tree element along its outward direction
//! - [`Centerpiece`] — delayed, pulsing reveal of the heart centerpiece
//! - [`OrnamentSway`], [`RingSway`], [`FloatMotion`] — idle motion while assembled
//! - [`Atmosphere`] — fades rings and sparkle layers out on explosion
//!
//! All eased scalars go through [`ease::approach`].

pub mod ambient;
pub mod atmosphere;
pub mod centerpiece;
pub mod delay;
pub mod ease;
pub mod explosion;
pub mod random;

pub use ambient::{AmbientOffset, FloatMotion, OrnamentSway, RingSway};
pub use atmosphere::Atmosphere;
pub use centerpiece::Centerpiece;
pub use delay::DelayTimer;
pub use explosion::{ExplosionParams, ExplosionUnit};
