use crate::input::{CellSize, ClickZones, InputHandler, KeyBindings, KeyMapping, SwipeTracker};
use crate::logging::{self, LogLevel};
use crate::navigation::TransitionTiming;
use crate::theme::Theme;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default = "default_theme_name")]
    pub theme: String,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub keys: KeyBindings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_theme_name() -> String {
    String::from("default")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            presentation: PresentationConfig::default(),
            pointer: PointerConfig::default(),
            keys: KeyBindings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PresentationConfig {
    /// Blank time between hiding one slide and showing the next
    pub fade_out_ms: u64,
    /// Time after a slide appears before the next request is accepted
    pub fade_in_ms: u64,
    /// Delay between revealing consecutive animated lines
    pub reveal_stagger_ms: u64,
    pub show_progress: bool,
    pub show_counter: bool,
    pub allow_fullscreen: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            fade_out_ms: 300,
            fade_in_ms: 300,
            reveal_stagger_ms: 150,
            show_progress: true,
            show_counter: true,
            allow_fullscreen: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
    pub retreat_zone: f64,
    pub advance_zone: f64,
    pub swipe_threshold_px: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            retreat_zone: 0.35,
            advance_zone: 0.65,
            swipe_threshold_px: 50.0,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Overrides `~/.config/lazyslide/logs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub theme: Theme,
    pub presentation: PresentationConfig,
    pub pointer: PointerConfig,
    pub keymap: KeyMapping,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn get_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("lazyslide")
    }

    /// Reads `config.toml` from `config_dir`, writing the defaults there first
    /// when it does not exist yet.
    fn load_config_file(config_dir: &Path) -> Result<ConfigFile> {
        let config_path = config_dir.join("config.toml");

        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;

            let default_config = ConfigFile::default();
            let toml_string = toml::to_string_pretty(&default_config)
                .context("Failed to serialize default config")?;
            std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

            Ok(default_config)
        }
    }

    /// Loads the user configuration. Problems are reported on stderr and the
    /// defaults are used instead, so a broken config never blocks a talk.
    pub fn new() -> Self {
        let config_dir = Self::get_config_dir();
        let config_file = Self::load_config_file(&config_dir).unwrap_or_else(|err| {
            eprintln!("Error loading config: {:#}", err);
            ConfigFile::default()
        });

        Self::from_file(config_file, &config_dir.join("themes")).unwrap_or_else(|err| {
            eprintln!("Error applying config: {:#}", err);
            Self::defaults()
        })
    }

    /// Loads an explicit config file; errors are returned, not papered over.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let theme_dir = path
            .parent()
            .map(|dir| dir.join("themes"))
            .unwrap_or_else(|| PathBuf::from("themes"));
        Self::from_toml_str(&content, &theme_dir)
    }

    pub fn from_toml_str(content: &str, theme_dir: &Path) -> Result<Self> {
        let config_file: ConfigFile = toml::from_str(content).context("Failed to parse config file")?;
        Self::from_file(config_file, theme_dir)
    }

    fn from_file(config_file: ConfigFile, theme_dir: &Path) -> Result<Self> {
        validate_pointer(&config_file.pointer)?;

        let theme = Theme::load(theme_dir, &config_file.theme).unwrap_or_else(|err| {
            logging::warn(&format!("Error loading theme {}: {:#}", config_file.theme, err));
            Theme::default()
        });
        let keymap = config_file.keys.to_mapping()?;

        Ok(Self {
            theme,
            theme_name: config_file.theme,
            presentation: config_file.presentation,
            pointer: config_file.pointer,
            keymap,
            logging: config_file.logging,
        })
    }

    pub fn defaults() -> Self {
        let file = ConfigFile::default();
        Self {
            theme_name: file.theme,
            theme: Theme::default(),
            presentation: file.presentation,
            pointer: file.pointer,
            keymap: KeyMapping::default(),
            logging: file.logging,
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .directory
            .clone()
            .unwrap_or_else(logging::default_log_dir)
    }

    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming::from_millis(self.presentation.fade_out_ms, self.presentation.fade_in_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.presentation.reveal_stagger_ms)
    }

    pub fn input_handler(&self) -> InputHandler {
        InputHandler::new(
            self.keymap.clone(),
            ClickZones::new(self.pointer.retreat_zone, self.pointer.advance_zone),
            SwipeTracker::new(self.pointer.swipe_threshold_px),
            CellSize {
                width_px: self.pointer.cell_width_px,
                height_px: self.pointer.cell_height_px,
            },
        )
    }
}

fn validate_pointer(pointer: &PointerConfig) -> Result<()> {
    let zones_ok = (0.0..=1.0).contains(&pointer.retreat_zone)
        && (0.0..=1.0).contains(&pointer.advance_zone)
        && pointer.retreat_zone <= pointer.advance_zone;
    if !zones_ok {
        return Err(anyhow!(
            "Click zones must satisfy 0 <= retreat_zone <= advance_zone <= 1 (got {} and {})",
            pointer.retreat_zone,
            pointer.advance_zone
        ));
    }
    if pointer.cell_width_px <= 0.0 || pointer.cell_height_px <= 0.0 {
        return Err(anyhow!("Cell size must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SlideAction;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn empty_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str("", dir.path()).unwrap();

        assert_eq!(config.theme_name, "default");
        assert_eq!(config.timing(), TransitionTiming::default());
        assert!(config.presentation.show_progress);
        assert_eq!(config.pointer, PointerConfig::default());
        assert_eq!(
            config.keymap.get_action(KeyCode::End, KeyModifiers::empty()),
            Some(SlideAction::Last)
        );
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml_str(
            "[presentation]\nfade_out_ms = 100\nshow_counter = false\n\n[keys]\nquit = [\"x\"]\n",
            dir.path(),
        )
        .unwrap();

        assert_eq!(config.presentation.fade_out_ms, 100);
        assert_eq!(config.presentation.fade_in_ms, 300);
        assert!(!config.presentation.show_counter);
        assert_eq!(
            config.keymap.get_action(KeyCode::Char('x'), KeyModifiers::empty()),
            Some(SlideAction::Quit)
        );
        assert_eq!(config.keymap.get_action(KeyCode::Char('q'), KeyModifiers::empty()), None);
    }

    #[test]
    fn inverted_click_zones_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_toml_str(
            "[pointer]\nretreat_zone = 0.8\nadvance_zone = 0.2\n",
            dir.path(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_config_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("lazyslide");

        let loaded = Config::load_config_file(&config_dir).unwrap();
        assert_eq!(loaded, ConfigFile::default());

        let written = std::fs::read_to_string(config_dir.join("config.toml")).unwrap();
        let reparsed: ConfigFile = toml::from_str(&written).unwrap();
        assert_eq!(reparsed, ConfigFile::default());
    }

    #[test]
    fn load_from_reads_theme_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("themes")).unwrap();
        std::fs::write(dir.path().join("themes").join("night.toml"), "text = [1, 2, 3]\n").unwrap();
        let path = dir.path().join("talk.toml");
        std::fs::write(&path, "theme = \"night\"\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme.text, Some([1, 2, 3]));
        assert_eq!(config.logging.level, LogLevel::Debug);
    }
}
