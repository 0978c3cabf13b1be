//! Scene configuration (parsed from TOML)

use evergreen_animation::centerpiece::DEFAULT_REVEAL_DELAY;
use evergreen_animation::atmosphere::ASSEMBLED_OPACITY;
use evergreen_animation::ExplosionParams;
use evergreen_core::{EvergreenError, Result, Vec3};
use serde::{Deserialize, Serialize};

/// Largest spiral a config may ask for
pub const MAX_ELEMENT_COUNT: usize = 10_000;

/// One of the hand-placed parts (stand, star)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartConfig {
    pub position: [f32; 3],
    pub distance: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    /// Fixed easing speed; omitted means the asymmetric defaults
    #[serde(default)]
    pub speed: Option<f32>,
}

fn default_rotation_speed() -> f32 {
    1.0
}

impl PartConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn explosion_params(&self) -> ExplosionParams {
        ExplosionParams {
            distance: self.distance,
            rotation_speed: self.rotation_speed,
            speed: self.speed,
        }
    }

    fn stand() -> Self {
        Self {
            position: [0.0, -5.5, 0.0],
            distance: 7.0,
            rotation_speed: 0.5,
            speed: None,
        }
    }

    fn star() -> Self {
        Self {
            position: [0.0, 7.5, 0.0],
            distance: 10.0,
            rotation_speed: 1.0,
            speed: Some(4.0),
        }
    }
}

/// Tunables for the tree layout and its animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of spiral elements (branches + ornaments)
    pub element_count: usize,
    pub tree_height: f32,
    pub max_radius: f32,
    /// Radius grows as `t^radius_exponent` from tip to base
    pub radius_exponent: f32,
    /// Probability that an element is a plain branch
    pub branch_share: f32,
    /// Scale at the tip
    pub base_scale: f32,
    /// Fraction of `base_scale` lost between tip and base
    pub scale_taper: f32,
    /// Per-element explosion distance, drawn from `[min, max)`
    pub distance_range: [f32; 2],
    /// Per-element fixed easing speed, drawn from `[min, max)`
    pub speed_range: [f32; 2],
    pub stand: PartConfig,
    pub star: PartConfig,
    pub centerpiece_position: [f32; 3],
    pub centerpiece_scale: f32,
    /// Seconds between the explosion and the centerpiece reveal
    pub reveal_delay: f32,
    /// Ring opacity while assembled
    pub atmosphere_opacity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            element_count: 140,
            tree_height: 11.0,
            max_radius: 4.2,
            radius_exponent: 0.85,
            branch_share: 0.4,
            base_scale: 1.0,
            scale_taper: 0.3,
            distance_range: [4.0, 12.0],
            speed_range: [2.0, 4.0],
            stand: PartConfig::stand(),
            star: PartConfig::star(),
            centerpiece_position: [0.0, 0.5, 0.0],
            centerpiece_scale: 1.8,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            atmosphere_opacity: ASSEMBLED_OPACITY,
        }
    }
}

impl SceneConfig {
    /// Parse a `[scene]`-style TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field describes a drawable tree
    pub fn validate(&self) -> Result<()> {
        if self.element_count > MAX_ELEMENT_COUNT {
            return Err(EvergreenError::ValueOutOfRange {
                field: "element_count".to_string(),
                min: 0.0,
                max: MAX_ELEMENT_COUNT as f64,
                value: self.element_count as f64,
            });
        }
        non_negative("tree_height", self.tree_height)?;
        non_negative("max_radius", self.max_radius)?;
        non_negative("radius_exponent", self.radius_exponent)?;
        in_range("branch_share", self.branch_share, 0.0, 1.0)?;
        in_range("scale_taper", self.scale_taper, 0.0, 1.0)?;
        in_range("atmosphere_opacity", self.atmosphere_opacity, 0.0, 1.0)?;
        if !(self.base_scale > 0.0 && self.base_scale <= 1.0) {
            return Err(out_of_range("base_scale", self.base_scale, 0.0, 1.0));
        }
        if !(self.reveal_delay > 0.0) {
            return Err(EvergreenError::InvalidConfig(format!(
                "reveal_delay must be positive, got {}",
                self.reveal_delay
            )));
        }
        ordered_range("distance_range", self.distance_range)?;
        ordered_range("speed_range", self.speed_range)?;
        if self.speed_range[0] <= 0.0 {
            return Err(EvergreenError::InvalidConfig(
                "speed_range must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn out_of_range(field: &str, value: f32, min: f64, max: f64) -> EvergreenError {
    EvergreenError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value: value as f64,
    }
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(field, value, 0.0, f64::MAX))
    }
}

fn in_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(out_of_range(field, value, min as f64, max as f64))
    }
}

fn ordered_range(field: &str, range: [f32; 2]) -> Result<()> {
    if range[0] <= range[1] && range[0].is_finite() && range[1].is_finite() {
        Ok(())
    } else {
        Err(EvergreenError::InvalidConfig(format!(
            "{field} is inverted: [{}, {}]",
            range[0], range[1]
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.element_count, 140);
        assert_eq!(config.star.speed, Some(4.0));
        assert_eq!(config.stand.speed, None);
    }

    #[test]
    fn parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
element_count = 60
branch_share = 0.5
distance_range = [2, 6]

[star]
position = [0.0, 8.0, 0.0]
distance = 12
"#;
        let config = SceneConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.element_count, 60);
        assert!((config.branch_share - 0.5).abs() < 1e-6);
        assert_eq!(config.distance_range, [2.0, 6.0]);
        assert!((config.star.distance - 12.0).abs() < 1e-6);
        assert_eq!(config.star.speed, None);
        assert!((config.star.rotation_speed - 1.0).abs() < 1e-6);
        assert!((config.tree_height - 11.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_branch_share() {
        let err = SceneConfig::from_toml_str("branch_share = 1.5").unwrap_err();
        assert!(matches!(err, EvergreenError::ValueOutOfRange { .. }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = SceneConfig::from_toml_str("speed_range = [4.0, 2.0]").unwrap_err();
        assert!(matches!(err, EvergreenError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_negative_height_and_zero_delay() {
        let mut config = SceneConfig::default();
        config.tree_height = -1.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.reveal_delay = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn caps_element_count() {
        let mut config = SceneConfig::default();
        config.element_count = MAX_ELEMENT_COUNT;
        assert!(config.validate().is_ok());

        config.element_count = MAX_ELEMENT_COUNT + 1;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            EvergreenError::ValueOutOfRange { ref field, .. } if field == "element_count"
        ));

        let err = SceneConfig::from_toml_str("element_count = 4000000000").unwrap_err();
        assert!(matches!(err, EvergreenError::ValueOutOfRange { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = SceneConfig::from_toml_str("element_count = \"many\"").unwrap_err();
        assert!(matches!(err, EvergreenError::TomlParseError(_)));
    }
}
