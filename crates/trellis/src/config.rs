//! Engine configuration, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::{
    arena::ArenaConfig,
    error::{Error, Result},
    input::InputConfig,
};

/// Box tree settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tags kept per box; extras are dropped with a warning.
    pub max_tags: usize,
    /// Animation time a box starts from before the cascade, in seconds.
    pub animation_time: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_tags: 8,
            animation_time: 0.0,
        }
    }
}

/// Top-level configuration.
///
/// ```
/// use trellis::config::Config;
///
/// let c = Config::from_json(r#"{ "ui": { "max_tags": 4 } }"#).unwrap();
/// assert_eq!(c.ui.max_tags, 4);
/// assert_eq!(c.input.click_time, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Click thresholds and input limits.
    pub input: InputConfig,
    /// The frame arena.
    pub arena: ArenaConfig,
    /// Box tree settings.
    pub ui: UiConfig,
}

impl Config {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(src: &str) -> Result<Self> {
        let c: Self = serde_json::from_str(src)?;
        c.validate()?;
        Ok(c)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.arena.validate()?;
        if self.ui.max_tags == 0 {
            return Err(Error::Config("ui.max_tags must be at least 1".into()));
        }
        if !self.ui.animation_time.is_finite() || self.ui.animation_time < 0.0 {
            return Err(Error::Config(
                "ui.animation_time must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
