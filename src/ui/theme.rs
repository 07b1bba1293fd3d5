use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::practice::surface::KeyFill;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "midnight";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub title: String,
    pub text_dim: String,
    pub prompt: String,
    pub border: String,
    pub key_default: String,
    pub key_label: String,
    pub key_highlight: String,
    pub success: String,
    pub error: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("typi")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!(
                        "ignoring unparsable theme {}: {e}",
                        user_theme_path.display()
                    ),
                }
            }
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1a1a2e".to_string(),
            fg: "#ffffff".to_string(),
            title: "#ffffff".to_string(),
            text_dim: "#aaaaaa".to_string(),
            prompt: "#4caf50".to_string(),
            border: "#4a4a8a".to_string(),
            key_default: "#2c2c54".to_string(),
            key_label: "#ffffff".to_string(),
            key_highlight: "#4a4a8a".to_string(),
            success: "#4caf50".to_string(),
            error: "#f44336".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        // Byte slicing below needs ASCII
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn title(&self) -> Color { Self::parse_color(&self.title) }
    pub fn text_dim(&self) -> Color { Self::parse_color(&self.text_dim) }
    pub fn prompt(&self) -> Color { Self::parse_color(&self.prompt) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn key_label(&self) -> Color { Self::parse_color(&self.key_label) }

    pub fn key_fill(&self, fill: KeyFill) -> Color {
        let hex = match fill {
            KeyFill::Default => &self.key_default,
            KeyFill::Highlight => &self.key_highlight,
            KeyFill::Success => &self.success,
            KeyFill::Error => &self.error,
        };
        Self::parse_color(hex)
    }
}
