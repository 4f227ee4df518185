//! Placement configuration parsed from environment variables.

use std::time::Duration;

use crate::consts::MOVE_THROTTLE_MS;
use crate::error::ConfigError;

/// Which input style the user is driving the canvas with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    Mouse,
    #[default]
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Minimum interval between accepted move events.
    pub move_throttle: Duration,
    /// Lifting the last finger confirms the placement.
    pub confirm_on_touch_end: bool,
    pub input_mode: InputMode,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            move_throttle: Duration::from_millis(MOVE_THROTTLE_MS),
            confirm_on_touch_end: false,
            input_mode: InputMode::Touch,
        }
    }
}

impl PlacementConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PLACEMENT_MOVE_THROTTLE_MS`: default 20
    /// - `PLACEMENT_CONFIRM_ON_TOUCH_END`: `true`/`false`/`1`/`0`, default `false`
    /// - `PLACEMENT_INPUT_MODE`: `touch` (default) or `mouse`
    pub fn from_env() -> Result<Self, ConfigError> {
        let throttle_ms = match std::env::var("PLACEMENT_MOVE_THROTTLE_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Parse { var: "PLACEMENT_MOVE_THROTTLE_MS", value: raw.clone() })?,
            Err(_) => MOVE_THROTTLE_MS,
        };
        let confirm_on_touch_end = match std::env::var("PLACEMENT_CONFIRM_ON_TOUCH_END") {
            Ok(raw) => parse_bool("PLACEMENT_CONFIRM_ON_TOUCH_END", &raw)?,
            Err(_) => false,
        };
        let input_mode = match std::env::var("PLACEMENT_INPUT_MODE") {
            Ok(raw) => parse_input_mode(&raw)?,
            Err(_) => InputMode::default(),
        };

        Ok(Self { move_throttle: Duration::from_millis(throttle_ms), confirm_on_touch_end, input_mode })
    }

    /// Whether the on-screen confirm/cancel control is shown.
    ///
    /// Touch input confirms either through the control or on touch-end, never both.
    #[must_use]
    pub fn shows_confirm_control(&self) -> bool {
        self.input_mode == InputMode::Touch && !self.confirm_on_touch_end
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Parse { var, value: raw.to_string() }),
    }
}

fn parse_input_mode(raw: &str) -> Result<InputMode, ConfigError> {
    match raw.trim() {
        "touch" => Ok(InputMode::Touch),
        "mouse" => Ok(InputMode::Mouse),
        _ => Err(ConfigError::Parse { var: "PLACEMENT_INPUT_MODE", value: raw.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
