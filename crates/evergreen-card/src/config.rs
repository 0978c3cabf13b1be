//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `EVERGREEN_GEMINI_API_KEY`, `EVERGREEN_MUTED`
//! 2. Project-local: `.evergreen/config.toml`
//! 3. Global: `~/.evergreen/config.toml`
//!
//! Layers are merged table by table before deserializing, so a file only
//! needs the keys it changes.

use evergreen_audio::AudioConfig;
use evergreen_core::{EvergreenError, Result};
use evergreen_scene::SceneConfig;
use evergreen_wish::WishConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const API_KEY_ENV: &str = "EVERGREEN_GEMINI_API_KEY";
pub const MUTED_ENV: &str = "EVERGREEN_MUTED";

/// Card text and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSection {
    pub title: String,
    pub subtitle: String,
    /// Prompt shown under the assembled tree
    pub hint: String,
    /// Heading of the revealed message
    pub headline: String,
    /// Message shown when no wish text is available
    pub greeting: String,
    pub signature: String,
    pub watch_again_label: String,
    /// Seconds between the explosion and the message reveal
    pub message_delay: f32,
    /// Fetch a generated wish on explosion and show it instead of the greeting
    pub wish_enabled: bool,
}

impl Default for CardSection {
    fn default() -> Self {
        Self {
            title: "给小V的圣诞树".to_string(),
            subtitle: "2025 CHRISTMAS".to_string(),
            hint: "点击屏幕 开启惊喜".to_string(),
            headline: "Surprise!".to_string(),
            greeting: "祝小V老师圣诞快乐，开开心心，\n\
                       拍更多好看的照片、赚更多的工资，\n\
                       以及希望你可以无忧无虑地做真实的自己！"
                .to_string(),
            signature: "爱来自椰椰".to_string(),
            watch_again_label: "再看一次".to_string(),
            message_delay: 0.8,
            wish_enabled: false,
        }
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub scene: SceneConfig,
    pub wish: WishConfig,
    pub audio: AudioConfig,
    pub card: CardSection,
}

impl CardConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut merged = Table::new();

        // Layer 1: Global config (~/.evergreen/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_tables(&mut merged, Self::load_table(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.evergreen/config.toml)
        let local_path = PathBuf::from(".evergreen/config.toml");
        if local_path.exists() {
            merge_tables(&mut merged, Self::load_table(&local_path)?);
        }

        let mut config = Self::from_table(merged)?;

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_table(Self::load_table(path)?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a single TOML document, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: Table = content.parse()?;
        let config = Self::from_table(table)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scene.validate()?;
        if !(self.card.message_delay >= 0.0 && self.card.message_delay.is_finite()) {
            return Err(EvergreenError::ValueOutOfRange {
                field: "card.message_delay".to_string(),
                min: 0.0,
                max: f64::MAX,
                value: self.card.message_delay as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.audio.music_volume) {
            return Err(EvergreenError::ValueOutOfRange {
                field: "audio.music_volume".to_string(),
                min: 0.0,
                max: 1.0,
                value: self.audio.music_volume as f64,
            });
        }
        if self.audio.sample_rate == 0 {
            return Err(EvergreenError::InvalidConfig(
                "audio.sample_rate must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.wish.api_key = Some(key);
        }
        if let Some(muted) = lookup(MUTED_ENV).and_then(|v| parse_flag(&v)) {
            self.audio.muted = muted;
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".evergreen").join("config.toml"))
    }

    fn load_table(path: &Path) -> Result<Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<Table>().map_err(|e| {
            EvergreenError::TomlParseError(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn from_table(table: Table) -> Result<Self> {
        Ok(Value::Table(table).try_into()?)
    }
}

/// Deep-merge `overlay` into `base`; overlay values win, nested tables merge.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
