//! Per-frame input state fed by platform events.

/// Platform events.
pub mod event;
/// Key codes, buttons and modifiers.
pub mod key;
/// The input state machine.
mod state;

use serde::{Deserialize, Serialize};

pub use event::Event;
pub use key::{Action, KeyCode, Mods, MouseButton};
pub use state::{ButtonState, InputState, KeyState, WindowState};

use crate::error::{Error, Result};

/// Click detection thresholds and input limits. Times are in seconds,
/// distances in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Longest press-to-release interval that still counts as a click.
    pub click_time: f32,
    /// Furthest the pointer may travel between press and release.
    pub click_distance: f32,
    /// Longest interval between presses in a double or triple click.
    pub multi_click_time: f32,
    /// Furthest apart presses in a double or triple click may be.
    pub multi_click_distance: f32,
    /// Codepoints of text input kept per frame.
    pub max_text_codepoints: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            click_time: 0.5,
            click_distance: 5.0,
            multi_click_time: 0.4,
            multi_click_distance: 5.0,
            max_text_codepoints: 64,
        }
    }
}

impl InputConfig {
    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.click_time,
            self.click_distance,
            self.multi_click_time,
            self.multi_click_distance,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::Config(
                "input thresholds must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
