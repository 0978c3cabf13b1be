//! Evergreen Scene - the exploding tree
//!
//! - [`SceneConfig`] — tunables, parsed from the `[scene]` TOML table
//! - [`layout`] — golden-angle spiral placement of branches and ornaments
//! - [`TreeScene`] — composition root: one explosion unit per placed element
//!   plus the stand, star, centerpiece, rings and sparkle layers
//! - [`Renderable`] / [`SceneRenderer`] — what the scene hands to a renderer

pub mod config;
pub mod layout;
pub mod renderable;
pub mod tree;

pub use config::{PartConfig, SceneConfig, MAX_ELEMENT_COUNT};
pub use layout::{generate_layout, BulbTint, Category, Layout, OrnamentKind, PlacedElement};
pub use renderable::{Renderable, SceneRenderer, SparkleLayer, Visual};
pub use tree::TreeScene;
