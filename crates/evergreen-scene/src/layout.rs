//! Golden-angle spiral placement
//!
//! Elements are laid out from the tip (`i = 0`) down to the base along a
//! phyllotaxis spiral, so the tree reads as a cone without any two elements
//! sharing a spot. Every element also gets its category and its randomized
//! explosion parameters here, so the whole layout comes from a single
//! randomness source.

use crate::config::SceneConfig;
use evergreen_animation::{random, ExplosionParams};
use evergreen_core::{ElementId, Vec3};
use rand::Rng;
use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};

const GOLDEN_RATIO: f32 = 1.618_034;
const AMBER_PROBABILITY: f64 = 0.4;

/// Where an ornament hangs relative to its spiral point, in the element's
/// own frame before scaling
pub const ORNAMENT_HANG: Vec3 = Vec3::new(0.0, 0.2, 0.2);

/// Decorative ornament shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrnamentKind {
    Gift,
    Star,
    Heart,
    Moon,
    Gingerbread,
    Polaroid,
    Stocking,
    Doll,
    Bulb,
}

/// Cumulative upper bounds of the ornament draw; anything above the last
/// bound is a bulb.
const ORNAMENT_TABLE: [(f32, OrnamentKind); 8] = [
    (0.20, OrnamentKind::Gift),
    (0.30, OrnamentKind::Star),
    (0.38, OrnamentKind::Heart),
    (0.45, OrnamentKind::Moon),
    (0.55, OrnamentKind::Gingerbread),
    (0.65, OrnamentKind::Polaroid),
    (0.75, OrnamentKind::Stocking),
    (0.85, OrnamentKind::Doll),
];

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 9] = [
        OrnamentKind::Gift,
        OrnamentKind::Star,
        OrnamentKind::Heart,
        OrnamentKind::Moon,
        OrnamentKind::Gingerbread,
        OrnamentKind::Polaroid,
        OrnamentKind::Stocking,
        OrnamentKind::Doll,
        OrnamentKind::Bulb,
    ];

    /// Pick a kind from a uniform draw in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        ORNAMENT_TABLE
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map(|(_, kind)| *kind)
            .unwrap_or(OrnamentKind::Bulb)
    }

    /// Size of the ornament model relative to its placement scale
    pub fn nominal_scale(&self) -> f32 {
        match self {
            OrnamentKind::Gift => 0.4,
            OrnamentKind::Star => 0.3,
            OrnamentKind::Heart | OrnamentKind::Moon | OrnamentKind::Bulb => 0.25,
            OrnamentKind::Gingerbread | OrnamentKind::Polaroid | OrnamentKind::Stocking => 0.35,
            OrnamentKind::Doll => 0.3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrnamentKind::Gift => "gift",
            OrnamentKind::Star => "star",
            OrnamentKind::Heart => "heart",
            OrnamentKind::Moon => "moon",
            OrnamentKind::Gingerbread => "gingerbread",
            OrnamentKind::Polaroid => "polaroid",
            OrnamentKind::Stocking => "stocking",
            OrnamentKind::Doll => "doll",
            OrnamentKind::Bulb => "bulb",
        }
    }

    /// Fixed tilt the ornament keeps for its whole life. Only gifts, stars,
    /// hearts and polaroids are tilted.
    fn rest_rotation<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match self {
            OrnamentKind::Gift => Vec3::new(rng.gen(), rng.gen(), rng.gen()),
            OrnamentKind::Star | OrnamentKind::Heart => Vec3::new(
                rng.gen::<f32>() * 0.5,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * 0.5,
            ),
            OrnamentKind::Polaroid => Vec3::new(0.0, 0.0, random::range(rng, -0.2, 0.2)),
            _ => Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Branch,
    Ornament(OrnamentKind),
}

impl Category {
    pub fn is_ornament(&self) -> bool {
        matches!(self, Category::Ornament(_))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Branch => write!(f, "branch"),
            Category::Ornament(kind) => write!(f, "{}", kind.name()),
        }
    }
}

/// Glass colour of a bulb ornament
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbTint {
    Red,
    Amber,
}

/// One element of the spiral, fixed at generation time
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub id: ElementId,
    pub position: Vec3,
    /// Yaw (radians) facing the element outward along the spiral
    pub orientation_y: f32,
    pub scale: f32,
    pub category: Category,
    /// Only set for bulbs
    pub tint: Option<BulbTint>,
    /// Euler tilt of the ornament model; zero for branches
    pub rest_rotation: Vec3,
    pub explosion: ExplosionParams,
}

impl PlacedElement {
    /// Offset from the spiral point to the ornament, turned by the element's
    /// yaw and scaled with it. Branches sit on the point itself.
    pub fn hang_offset(&self) -> Vec3 {
        if !self.category.is_ornament() {
            return Vec3::ZERO;
        }
        let (sin, cos) = self.orientation_y.sin_cos();
        Vec3::new(
            ORNAMENT_HANG.x * cos + ORNAMENT_HANG.z * sin,
            ORNAMENT_HANG.y,
            ORNAMENT_HANG.z * cos - ORNAMENT_HANG.x * sin,
        ) * self.scale
    }
}

/// The immutable result of [`generate_layout`]
#[derive(Debug, Clone, Default)]
pub struct Layout {
    elements: Vec<PlacedElement>,
}

impl Layout {
    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedElement> {
        self.elements.iter()
    }

    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element count per category
    pub fn histogram(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for element in &self.elements {
            *counts.entry(element.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn ornament_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.category.is_ornament())
            .count()
    }
}

/// Lay out `config.element_count` elements on the spiral.
pub fn generate_layout<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Layout {
    let n = config.element_count;
    let height = config.tree_height;
    let mut elements = Vec::with_capacity(n);

    for i in 0..n {
        let t = i as f32 / n as f32;
        let y = height / 2.0 - t * height;
        let radius = config.max_radius * t.powf(config.radius_exponent);
        let angle = i as f32 * TAU * GOLDEN_RATIO;

        let category = if rng.gen::<f32>() > config.branch_share {
            Category::Ornament(OrnamentKind::from_roll(rng.gen()))
        } else {
            Category::Branch
        };
        let tint = match category {
            Category::Ornament(OrnamentKind::Bulb) => Some(if rng.gen_bool(AMBER_PROBABILITY) {
                BulbTint::Amber
            } else {
                BulbTint::Red
            }),
            _ => None,
        };
        let rest_rotation = match category {
            Category::Ornament(kind) => kind.rest_rotation(rng),
            Category::Branch => Vec3::ZERO,
        };

        let distance = random::range(rng, config.distance_range[0], config.distance_range[1]);
        let speed = random::range(rng, config.speed_range[0], config.speed_range[1]);

        elements.push(PlacedElement {
            id: ElementId::from_index(i),
            position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
            orientation_y: -angle,
            scale: config.base_scale * (1.0 - config.scale_taper * t),
            category,
            tint,
            rest_rotation,
            explosion: ExplosionParams::default()
                .with_distance(distance)
                .with_speed(speed),
        });
    }

    Layout { elements }
}
