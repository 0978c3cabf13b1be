//! The assembled scene
//!
//! [`TreeScene`] owns every animated part of the card. It is advanced with a
//! single [`FrameContext`] per frame and emits a flat draw list; it never
//! reaches into a part's state from outside that part.

use crate::config::SceneConfig;
use crate::layout::{generate_layout, Category, Layout};
use crate::renderable::{Renderable, SceneRenderer, SparkleLayer, Visual};
use evergreen_animation::{
    AmbientOffset, Atmosphere, Centerpiece, ExplosionUnit, FloatMotion, OrnamentSway, RingSway,
};
use evergreen_core::{ElementId, Result, Vec3};
use evergreen_runtime::{FrameContext, FrameSystem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use tracing::{debug, info};

const STAR_LIGHT: f32 = 5.0;

/// Height, radius and resting tilt (about X) of each ring, lowest first
const RINGS: [(f32, f32, f32); 3] = [
    (-3.0, 5.0, PI / 2.0),
    (0.0, 3.5, PI / 2.1),
    (3.0, 2.0, PI / 1.9),
];

/// One spiral element and its motion
#[derive(Debug, Clone)]
struct TreeElement {
    id: ElementId,
    unit: ExplosionUnit,
    sway: Option<OrnamentSway>,
}

pub struct TreeScene {
    config: SceneConfig,
    layout: Layout,
    elements: Vec<TreeElement>,
    stand: ExplosionUnit,
    star: ExplosionUnit,
    centerpiece: Centerpiece,
    rings: RingSway,
    float: FloatMotion,
    atmosphere: Atmosphere,
    exploded: bool,
}

impl TreeScene {
    /// Build a scene seeded from OS entropy
    pub fn new(config: SceneConfig) -> Result<Self> {
        Self::with_rng(config, &mut StdRng::from_entropy())
    }

    /// Build a scene drawing every random choice from `rng`
    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let layout = generate_layout(&config, rng);
        let elements = layout
            .iter()
            .map(|placed| TreeElement {
                id: placed.id,
                unit: ExplosionUnit::new(placed.position, placed.explosion, rng),
                sway: placed
                    .category
                    .is_ornament()
                    .then(|| OrnamentSway::new(rng)),
            })
            .collect();

        let stand = ExplosionUnit::new(
            config.stand.position(),
            config.stand.explosion_params(),
            rng,
        );
        let star = ExplosionUnit::new(config.star.position(), config.star.explosion_params(), rng);

        info!(
            "[scene] built tree: {} elements ({} ornaments)",
            layout.len(),
            layout.ornament_count()
        );
        for (category, count) in layout.histogram() {
            debug!("[scene]   {}: {}", category, count);
        }

        Ok(Self {
            centerpiece: Centerpiece::new(config.reveal_delay),
            atmosphere: Atmosphere::new(config.atmosphere_opacity),
            rings: RingSway::new(),
            float: FloatMotion::new(rng),
            config,
            layout,
            elements,
            stand,
            star,
            exploded: false,
        })
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn centerpiece(&self) -> &Centerpiece {
        &self.centerpiece
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    /// Explosion state of one spiral element
    pub fn unit(&self, id: ElementId) -> Option<&ExplosionUnit> {
        self.elements.get(id.index()).map(|e| &e.unit)
    }

    pub fn stand(&self) -> &ExplosionUnit {
        &self.stand
    }

    pub fn star(&self) -> &ExplosionUnit {
        &self.star
    }

    /// Every eased value has reached the target implied by the last frame's
    /// trigger state.
    pub fn is_settled(&self) -> bool {
        let exploded = self.exploded;
        let unit_settled = |unit: &ExplosionUnit| {
            if exploded {
                unit.is_fully_exploded()
            } else {
                unit.is_at_rest()
            }
        };
        let atmosphere_target = if exploded {
            0.0
        } else {
            self.config.atmosphere_opacity
        };

        self.elements.iter().all(|e| unit_settled(&e.unit))
            && unit_settled(&self.stand)
            && unit_settled(&self.star)
            && self.centerpiece.is_settled()
            && self.centerpiece.is_revealed() == exploded
            && self.atmosphere.opacity() == atmosphere_target
    }

    /// Emit this frame's draw list
    pub fn render<S: SceneRenderer + ?Sized>(&self, renderer: &mut S) {
        let float = self.float.offset();

        for (element, placed) in self.elements.iter().zip(self.layout.iter()) {
            let sway = element
                .sway
                .as_ref()
                .map(OrnamentSway::offset)
                .unwrap_or(AmbientOffset::ZERO);
            let position = float.position
                + element.unit.position()
                + placed.hang_offset()
                + sway.position;
            let rotation = float.rotation
                + element.unit.rotation()
                + Vec3::new(0.0, placed.orientation_y, 0.0)
                + sway.rotation
                + placed.rest_rotation;

            let (visual, scale) = match placed.category {
                Category::Branch => (Visual::Branch(element.id), placed.scale),
                Category::Ornament(kind) => (
                    Visual::Ornament {
                        id: element.id,
                        kind,
                        tint: placed.tint,
                    },
                    placed.scale * kind.nominal_scale(),
                ),
            };
            renderer.draw(Renderable::new(visual, position, rotation, scale));
        }

        renderer.draw(Renderable::new(
            Visual::Stand,
            float.position + self.stand.position(),
            float.rotation + self.stand.rotation(),
            1.0,
        ));
        renderer.draw(
            Renderable::new(
                Visual::Star,
                float.position + self.star.position(),
                float.rotation + self.star.rotation(),
                1.0,
            )
            .with_light(STAR_LIGHT),
        );

        if self.atmosphere.is_active() {
            let wobble = self.rings.offset();
            for (index, (height, radius, tilt)) in RINGS.iter().enumerate() {
                let rotation = float.rotation
                    + wobble.rotation
                    + Vec3::new(*tilt, self.rings.yaw(), 0.0);
                renderer.draw(
                    Renderable::new(
                        Visual::Ring {
                            index,
                            radius: *radius,
                        },
                        float.position + Vec3::new(0.0, *height, 0.0),
                        rotation,
                        1.0,
                    )
                    .with_opacity(self.atmosphere.opacity()),
                );
            }

            let fade = self.atmosphere.fade();
            for layer in SparkleLayer::AMBIENT {
                renderer.draw(
                    Renderable::new(Visual::Sparkles(layer), float.position, float.rotation, 1.0)
                        .with_opacity(layer.base_opacity() * fade),
                );
            }
        }

        let heart_position = Vec3::from_array(self.config.centerpiece_position);
        let heart_scale = self.centerpiece.display_scale();
        renderer.draw(
            Renderable::new(
                Visual::Centerpiece,
                heart_position,
                Vec3::new(0.0, self.centerpiece.yaw(), 0.0),
                heart_scale * self.config.centerpiece_scale,
            )
            .with_visible(heart_scale > 0.0)
            .with_light(self.centerpiece.light_intensity()),
        );
        if self.centerpiece.sparkles_visible() {
            let layer = SparkleLayer::Centerpiece;
            renderer.draw(
                Renderable::new(Visual::Sparkles(layer), heart_position, Vec3::ZERO, heart_scale)
                    .with_opacity(layer.base_opacity()),
            );
        }
    }
}

impl FrameSystem for TreeScene {
    fn advance(&mut self, ctx: &FrameContext) {
        self.exploded = ctx.exploded;

        for element in &mut self.elements {
            element.unit.advance(ctx);
            if let Some(sway) = element.sway.as_mut() {
                sway.advance(ctx);
            }
        }
        self.stand.advance(ctx);
        self.star.advance(ctx);

        self.centerpiece.set_visible(ctx.exploded);
        if self.centerpiece.advance(ctx) {
            info!("[scene] centerpiece revealed");
        }

        self.rings.advance(ctx);
        self.float.advance(ctx);
        self.atmosphere.advance(ctx);
    }

    fn name(&self) -> &str {
        "tree_scene"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::OrnamentKind;

    const STEP: f32 = 0.016;

    fn scene(count: usize, seed: u64) -> TreeScene {
        let config = SceneConfig {
            element_count: count,
            ..SceneConfig::default()
        };
        TreeScene::with_rng(config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn run(scene: &mut TreeScene, exploded: bool, seconds: f32, elapsed: &mut f32) {
        let steps = (seconds / STEP).round() as usize;
        for _ in 0..steps {
            *elapsed += STEP;
            scene.advance(&FrameContext::new(STEP, *elapsed, exploded));
        }
    }

    fn frame(scene: &TreeScene) -> Vec<Renderable> {
        let mut out = Vec::new();
        scene.render(&mut out);
        out
    }

    #[test]
    fn builds_one_unit_per_element() {
        let s = scene(140, 1);
        assert_eq!(s.element_count(), 140);
        assert_eq!(s.layout().len(), 140);
        assert_eq!(s.name(), "tree_scene");
        assert!(s.unit(ElementId(139)).is_some());
        assert!(s.unit(ElementId(140)).is_none());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SceneConfig {
            branch_share: 2.0,
            ..SceneConfig::default()
        };
        assert!(TreeScene::with_rng(config, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn explode_and_reassemble_round_trip() {
        let mut s = scene(40, 2);
        let mut t = 0.0;

        run(&mut s, false, 0.5, &mut t);
        let rest: Vec<Vec3> = (0..40)
            .map(|i| s.unit(ElementId(i)).unwrap().rest_position().unwrap())
            .collect();

        run(&mut s, true, 10.0, &mut t);
        assert!(s.is_settled());
        assert!(s.centerpiece().is_revealed());
        assert!(!s.atmosphere().is_active());
        for i in 0..40 {
            let unit = s.unit(ElementId(i)).unwrap();
            assert!(unit.is_fully_exploded());
            let expected = rest[i as usize] + unit.direction().unwrap() * unit.params().distance;
            assert!(unit.position().distance(&expected) < 1e-4);
        }
        assert!(s.stand().is_fully_exploded());
        assert!(s.star().is_fully_exploded());

        run(&mut s, false, 15.0, &mut t);
        assert!(s.is_settled());
        assert!(!s.centerpiece().is_revealed());
        for i in 0..40 {
            let unit = s.unit(ElementId(i)).unwrap();
            assert_eq!(unit.position(), rest[i as usize]);
            assert_eq!(unit.rotation(), Vec3::ZERO);
        }
    }

    #[test]
    fn stand_and_star_use_their_own_tuning() {
        let s = scene(0, 3);
        assert_eq!(s.stand().params().distance, 7.0);
        assert_eq!(s.stand().params().rotation_speed, 0.5);
        assert_eq!(s.stand().params().speed, None);
        assert_eq!(s.star().params().distance, 10.0);
        assert_eq!(s.star().params().speed, Some(4.0));
    }

    #[test]
    fn empty_tree_still_renders_parts() {
        let mut s = scene(0, 4);
        let mut t = 0.0;
        run(&mut s, false, 0.1, &mut t);

        let items = frame(&s);
        assert!(items.iter().any(|r| r.visual == Visual::Stand));
        assert!(items.iter().any(|r| r.visual == Visual::Star && r.light == 5.0));
        assert!(!items
            .iter()
            .any(|r| matches!(r.visual, Visual::Branch(_) | Visual::Ornament { .. })));
    }

    #[test]
    fn assembled_frame_contents() {
        let mut s = scene(30, 5);
        let mut t = 0.0;
        run(&mut s, false, 1.0, &mut t);

        let items = frame(&s);
        let spiral = items
            .iter()
            .filter(|r| matches!(r.visual, Visual::Branch(_) | Visual::Ornament { .. }))
            .count();
        assert_eq!(spiral, 30);

        let rings: Vec<&Renderable> = items
            .iter()
            .filter(|r| matches!(r.visual, Visual::Ring { .. }))
            .collect();
        assert_eq!(rings.len(), 3);
        for ring in rings {
            assert!((ring.opacity - s.atmosphere().opacity()).abs() < 1e-6);
        }

        let sparkles = items
            .iter()
            .filter(|r| matches!(r.visual, Visual::Sparkles(_)))
            .count();
        assert_eq!(sparkles, 3);

        let heart = items
            .iter()
            .find(|r| r.visual == Visual::Centerpiece)
            .unwrap();
        assert!(!heart.visible);
        assert_eq!(heart.light, 0.0);
    }

    #[test]
    fn exploded_frame_drops_atmosphere_and_shows_heart() {
        let mut s = scene(30, 6);
        let mut t = 0.0;
        run(&mut s, true, 5.0, &mut t);

        let items = frame(&s);
        assert!(!items.iter().any(|r| matches!(r.visual, Visual::Ring { .. })));
        assert!(!items
            .iter()
            .any(|r| r.visual == Visual::Sparkles(SparkleLayer::Snow)));

        let heart = items
            .iter()
            .find(|r| r.visual == Visual::Centerpiece)
            .unwrap();
        assert!(heart.visible);
        assert_eq!(heart.light, 8.0);
        assert!(heart.scale > 1.8 * 0.94);
        assert!(items
            .iter()
            .any(|r| r.visual == Visual::Sparkles(SparkleLayer::Centerpiece)));
    }

    #[test]
    fn quick_reset_never_reveals_centerpiece() {
        let mut s = scene(10, 7);
        let mut t = 0.0;
        run(&mut s, true, 0.2, &mut t);
        run(&mut s, false, 3.0, &mut t);
        assert!(!s.centerpiece().is_revealed());
        assert_eq!(s.centerpiece().display_scale(), 0.0);
    }

    #[test]
    fn ornaments_are_scaled_by_kind() {
        let mut s = scene(80, 8);
        let mut t = 0.0;
        run(&mut s, false, 0.1, &mut t);

        let items = frame(&s);
        for (placed, item) in s.layout().iter().zip(items.iter()) {
            match (placed.category, item.visual) {
                (Category::Branch, Visual::Branch(id)) => {
                    assert_eq!(id, placed.id);
                    assert_eq!(item.scale, placed.scale);
                }
                (Category::Ornament(kind), Visual::Ornament { id, kind: drawn, .. }) => {
                    assert_eq!(id, placed.id);
                    assert_eq!(kind, drawn);
                    assert!((item.scale - placed.scale * kind.nominal_scale()).abs() < 1e-6);
                    if kind == OrnamentKind::Bulb {
                        assert!(placed.tint.is_some());
                    }
                }
                other => panic!("draw order mismatch: {other:?}"),
            }
        }
    }

    #[test]
    fn ornaments_hang_off_their_spiral_point() {
        let mut s = scene(60, 10);
        let mut t = 0.0;
        run(&mut s, false, 0.5, &mut t);

        let items = frame(&s);
        let float = s.float.offset();
        let mut ornaments = 0;
        for ((element, placed), item) in s.elements.iter().zip(s.layout.iter()).zip(items.iter()) {
            let sway = element
                .sway
                .as_ref()
                .map(OrnamentSway::offset)
                .unwrap_or(AmbientOffset::ZERO);
            let anchor = float.position + element.unit.position() + sway.position;
            let turned = float.rotation
                + element.unit.rotation()
                + Vec3::new(0.0, placed.orientation_y, 0.0)
                + sway.rotation;

            if placed.category.is_ornament() {
                ornaments += 1;
                let hang = item.position - anchor;
                assert!((hang.y - 0.2 * placed.scale).abs() < 1e-4);
                assert!(hang.distance(&placed.hang_offset()) < 1e-4);
                assert!(item.rotation.distance(&(turned + placed.rest_rotation)) < 1e-4);
            } else {
                assert!(item.position.distance(&anchor) < 1e-4);
                assert!(item.rotation.distance(&turned) < 1e-4);
            }
        }
        assert!(ornaments > 0);
    }

    #[test]
    fn sparkle_opacity_follows_fade() {
        let mut s = scene(5, 9);
        let mut t = 0.0;
        run(&mut s, false, 10.0, &mut t);
        run(&mut s, true, 0.1, &mut t);

        let fade = s.atmosphere().fade();
        assert!(fade > 0.0 && fade < 1.0);
        let items = frame(&s);
        let gold = items
            .iter()
            .find(|r| r.visual == Visual::Sparkles(SparkleLayer::GoldDust))
            .unwrap();
        assert!((gold.opacity - 0.8 * fade).abs() < 1e-6);
    }
}
