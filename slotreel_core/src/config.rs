use std::{fmt, fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, symbols::IconCatalog};

/// Win evaluation reads reels 0, 1 and 2.
pub const MIN_REELS: usize = 3;

/// Control points of a CSS `cubic-bezier()` timing function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// Slight wind-up at the start, small overshoot before the stop.
    pub const REEL_STOP: Self = Self {
        x1: 0.41,
        y1: -0.01,
        x2: 0.63,
        y2: 1.09,
    };
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({},{},{},{})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub catalog: IconCatalog,
    pub reel_count: usize,
    /// Height of one icon in the strip, in pixels.
    pub icon_height: f64,
    /// Animation time for moving one icon at full speed.
    pub time_per_icon_ms: u64,
    /// Start delay added per reel position.
    pub stagger_delay_ms: u64,
    /// Extra icons worth of time added to every roll so short rolls still ease out.
    pub settle_icons: u64,
    pub win_marker_ms: u64,
    pub easing: CubicBezier,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: IconCatalog::classic(),
            reel_count: 4,
            icon_height: 79.0,
            time_per_icon_ms: 100,
            stagger_delay_ms: 150,
            settle_icons: 8,
            win_marker_ms: 2000,
            easing: CubicBezier::REEL_STOP,
        }
    }
}

impl EngineConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.reel_count < MIN_REELS {
            return Err(ConfigError::TooFewReels {
                count: self.reel_count,
            });
        }
        if !(self.icon_height.is_finite() && self.icon_height > 0.0) {
            return Err(ConfigError::NonPositiveIconHeight(self.icon_height));
        }
        Ok(())
    }

    pub fn icon_count(&self) -> usize {
        self.catalog.len()
    }

    /// Length of one full turn of the strip, in pixels.
    pub fn strip_height(&self) -> f64 {
        self.icon_count() as f64 * self.icon_height
    }

    pub fn stagger_delay(&self, stagger: usize) -> Duration {
        Duration::from_millis(self.stagger_delay_ms * stagger as u64)
    }

    pub fn roll_duration(&self, distance: u64) -> Duration {
        Duration::from_millis((self.settle_icons + distance) * self.time_per_icon_ms)
    }

    pub fn win_marker_duration(&self) -> Duration {
        Duration::from_millis(self.win_marker_ms)
    }
}
