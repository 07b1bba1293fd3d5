use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::keyboard::geometry::KeyGeometry;
use crate::ui::animation::AnimationTiming;
use crate::ui::theme::DEFAULT_THEME;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_pulse_period_ms")]
    pub pulse_period_ms: u64,
    #[serde(default = "default_pulse_min_alpha")]
    pub pulse_min_alpha: f64,
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,
    #[serde(default = "default_flash_scale")]
    pub flash_scale: f64,
    #[serde(default = "default_space_width_multiplier")]
    pub space_width_multiplier: f64,
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_tick_rate_ms() -> u64 {
    33
}
fn default_pulse_period_ms() -> u64 {
    500
}
fn default_pulse_min_alpha() -> f64 {
    0.6
}
fn default_flash_duration_ms() -> u64 {
    100
}
fn default_flash_scale() -> f64 {
    1.15
}
fn default_space_width_multiplier() -> f64 {
    6.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate_ms(),
            pulse_period_ms: default_pulse_period_ms(),
            pulse_min_alpha: default_pulse_min_alpha(),
            flash_duration_ms: default_flash_duration_ms(),
            flash_scale: default_flash_scale(),
            space_width_multiplier: default_space_width_multiplier(),
        }
    }
}

impl Config {
    /// Load `~/.config/typi/config.toml`, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.sanitize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typi")
            .join("config.toml")
    }

    /// Reset values that would stall or invert the animations.
    pub fn sanitize(&mut self) {
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
        if self.flash_duration_ms == 0 {
            self.flash_duration_ms = default_flash_duration_ms();
        }
        if !(0.0..=1.0).contains(&self.pulse_min_alpha) {
            self.pulse_min_alpha = default_pulse_min_alpha();
        }
        if !(self.flash_scale >= 1.0 && self.flash_scale.is_finite()) {
            self.flash_scale = default_flash_scale();
        }
        if !(self.space_width_multiplier > 0.0 && self.space_width_multiplier.is_finite()) {
            self.space_width_multiplier = default_space_width_multiplier();
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn animation_timing(&self) -> AnimationTiming {
        AnimationTiming {
            pulse_half_period: Duration::from_millis(self.pulse_period_ms),
            pulse_min_alpha: self.pulse_min_alpha,
            flash_duration: Duration::from_millis(self.flash_duration_ms),
            flash_scale: self.flash_scale,
        }
    }

    pub fn geometry(&self) -> KeyGeometry {
        KeyGeometry {
            space_width_multiplier: self.space_width_multiplier,
            ..KeyGeometry::default()
        }
    }
}
