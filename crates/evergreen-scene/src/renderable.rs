//! Draw list handed to the renderer

use crate::layout::{BulbTint, OrnamentKind};
use evergreen_core::{ElementId, Vec3};

/// Drifting particle layers around the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparkleLayer {
    Snow,
    GoldDust,
    LargeFlakes,
    /// The small burst around the revealed centerpiece
    Centerpiece,
}

impl SparkleLayer {
    /// The three layers tied to the atmosphere fade
    pub const AMBIENT: [SparkleLayer; 3] =
        [SparkleLayer::Snow, SparkleLayer::GoldDust, SparkleLayer::LargeFlakes];

    pub fn particle_count(&self) -> u32 {
        match self {
            SparkleLayer::Snow => 80,
            SparkleLayer::GoldDust => 100,
            SparkleLayer::LargeFlakes => 120,
            SparkleLayer::Centerpiece => 40,
        }
    }

    /// Opacity at full atmosphere
    pub fn base_opacity(&self) -> f32 {
        match self {
            SparkleLayer::Snow => 0.6,
            SparkleLayer::GoldDust => 0.8,
            SparkleLayer::LargeFlakes => 0.35,
            SparkleLayer::Centerpiece => 0.8,
        }
    }
}

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Branch(ElementId),
    Ornament {
        id: ElementId,
        kind: OrnamentKind,
        tint: Option<BulbTint>,
    },
    Stand,
    Star,
    Centerpiece,
    /// Decorative torus; `index` 0 is the lowest ring
    Ring { index: usize, radius: f32 },
    Sparkles(SparkleLayer),
}

/// One drawable with its final transform for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub visual: Visual,
    pub position: Vec3,
    /// Euler angles, radians
    pub rotation: Vec3,
    pub scale: f32,
    pub visible: bool,
    pub opacity: f32,
    /// Point light strength carried by the drawable, 0 if unlit
    pub light: f32,
}

impl Renderable {
    pub fn new(visual: Visual, position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            visual,
            position,
            rotation,
            scale,
            visible: true,
            opacity: 1.0,
            light: 0.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_light(mut self, light: f32) -> Self {
        self.light = light;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Receives the scene's draw list once per frame.
pub trait SceneRenderer {
    fn draw(&mut self, item: Renderable);
}

/// Collecting renderer, handy for headless hosts and tests
impl SceneRenderer for Vec<Renderable> {
    fn draw(&mut self, item: Renderable) {
        self.push(item);
    }
}
