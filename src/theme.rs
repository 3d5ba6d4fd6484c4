use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Theme {
    // Background transparency setting
    #[serde(default)]
    pub transparent_backgrounds: bool,

    // Background colors
    pub base: Option<[u8; 3]>,
    pub surface: Option<[u8; 3]>,

    // Content colors
    pub text: Option<[u8; 3]>,
    pub subtext: Option<[u8; 3]>,
    pub heading: Option<[u8; 3]>,
    pub code: Option<[u8; 3]>,

    // Accents
    pub accent: Option<[u8; 3]>,
    pub link: Option<[u8; 3]>,
    pub progress: Option<[u8; 3]>,
}

impl Theme {
    /// Reads `<dir>/<name>.toml`, falling back to the built-in colours when the
    /// file does not exist.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let theme_path = dir.join(format!("{}.toml", name));

        if theme_path.exists() {
            let content =
                std::fs::read_to_string(&theme_path).context("Failed to read theme file")?;
            toml::from_str(&content).context("Failed to parse theme file")
        } else {
            Ok(Theme::default())
        }
    }

    fn color(&self, rgb: Option<[u8; 3]>, default: Color) -> Color {
        rgb.map_or(default, |[r, g, b]| Color::Rgb(r, g, b))
    }

    pub fn bg_color(&self, rgb: Option<[u8; 3]>) -> Color {
        if self.transparent_backgrounds {
            Color::Reset
        } else {
            self.color(rgb, Color::Reset)
        }
    }

    pub fn base_color(&self) -> Color {
        self.bg_color(self.base)
    }

    pub fn surface_color(&self) -> Color {
        self.bg_color(self.surface)
    }

    pub fn text_color(&self) -> Color {
        self.color(self.text, Color::White)
    }

    pub fn subtext_color(&self) -> Color {
        self.color(self.subtext, Color::DarkGray)
    }

    pub fn heading_color(&self) -> Color {
        self.color(self.heading, Color::Cyan)
    }

    pub fn code_color(&self) -> Color {
        self.color(self.code, Color::Yellow)
    }

    pub fn accent_color(&self) -> Color {
        self.color(self.accent, Color::Magenta)
    }

    pub fn link_color(&self) -> Color {
        self.color(self.link, Color::Blue)
    }

    pub fn progress_color(&self) -> Color {
        self.color(self.progress, self.accent_color())
    }
}
