use crate::cards::{Deck, DEFAULT_IMAGES};
use crate::controller::DeckTuning;
use crate::theme::ThemeVariant;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "flickdeck.toml";
const ENV_PREFIX: &str = "FLICKDECK_";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("the deck needs at least one card")]
    EmptyDeck,
    #[error("cell size must be non-zero, got {width}x{height}px")]
    ZeroCellSize { width: u16, height: u16 },
    #[error("card size must be positive, got {width}x{height}px")]
    InvalidCardSize { width: f64, height: f64 },
    #[error("frame rate must be non-zero")]
    ZeroFrameRate,
    #[error("trigger velocity must not be negative, got {0}")]
    NegativeTriggerVelocity(f64),
    #[error("failed to read settings: {0}")]
    Load(Box<figment::Error>),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal geometry in px.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub cell_width_px: u16,
    pub cell_height_px: u16,
    pub card_width_px: f64,
    pub card_height_px: f64,
    pub fps: u16,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            cell_width_px: 8,
            cell_height_px: 16,
            card_width_px: 180.0,
            card_height_px: 240.0,
            fps: 60,
        }
    }
}

impl DisplaySettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / u32::from(self.fps.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `flickdeck_core=debug`.
    pub level: String,
    pub file_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            directory: None,
        }
    }
}

impl LoggingSettings {
    /// Configured directory, or `logs/` under the platform data dir.
    pub fn log_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_local_dir().join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeVariant,
    /// Image references, bottom card first.
    pub cards: Vec<String>,
    /// Fixed seed for the card tilts; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub deck: DeckTuning,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            cards: DEFAULT_IMAGES.iter().map(|image| image.to_string()).collect(),
            seed: None,
            deck: DeckTuning::default(),
            display: DisplaySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "flickdeck")
}

impl Settings {
    /// `flickdeck.toml` in the platform config dir, or the working directory
    /// when there is none.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Defaults, then the TOML file, then `FLICKDECK_*` variables
    /// (`FLICKDECK_DECK__RESTOCK_DELAY_MS=900`).
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate. A missing file is created from the defaults first.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            Settings::default().save(path)?;
        }
        Self::extract(Self::figment(path))
    }

    pub(crate) fn extract(figment: Figment) -> Result<Self, SettingsError> {
        let settings: Settings = figment
            .extract()
            .map_err(|e| SettingsError::Load(Box::new(e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let toml_string = toml::to_string_pretty(self)?;
        let write_error = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, toml_string).map_err(write_error)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cards.is_empty() {
            return Err(SettingsError::EmptyDeck);
        }
        let display = &self.display;
        if display.cell_width_px == 0 || display.cell_height_px == 0 {
            return Err(SettingsError::ZeroCellSize {
                width: display.cell_width_px,
                height: display.cell_height_px,
            });
        }
        if !(display.card_width_px > 0.0 && display.card_height_px > 0.0) {
            return Err(SettingsError::InvalidCardSize {
                width: display.card_width_px,
                height: display.card_height_px,
            });
        }
        if display.fps == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }
        if self.deck.trigger_velocity < 0.0 {
            return Err(SettingsError::NegativeTriggerVelocity(
                self.deck.trigger_velocity,
            ));
        }
        Ok(())
    }

    pub fn build_deck(&self) -> Result<Deck, SettingsError> {
        Deck::new(self.cards.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Result<Settings, SettingsError> {
        Settings::extract(
            Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(source)),
        )
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flickdeck-test-{}-{}", name, std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn defaults_match_the_demo() {
        let settings = Settings::default();
        assert_eq!(settings.cards.len(), 6);
        assert_eq!(settings.deck.trigger_velocity, 0.2);
        assert_eq!(settings.deck.restock_delay(), Duration::from_millis(600));
        assert_eq!(settings.theme, ThemeVariant::EverforestDark);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = from_toml(
            r#"
            cards = ["a.jpg", "b.jpg", "c.jpg"]
            seed = 42
            theme = "EverforestLight"

            [deck]
            restock_delay_ms = 900
            "#,
        )
        .unwrap();
        assert_eq!(settings.cards.len(), 3);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.theme, ThemeVariant::EverforestLight);
        assert_eq!(settings.deck.restock_delay_ms, 900);
        assert_eq!(settings.deck.trigger_velocity, 0.2);
        assert_eq!(settings.display.fps, 60);
    }

    #[test]
    fn empty_card_list_is_rejected() {
        let result = from_toml("cards = []");
        assert!(matches!(result, Err(SettingsError::EmptyDeck)));
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let result = from_toml("[display]\ncell_width_px = 0");
        assert!(matches!(
            result,
            Err(SettingsError::ZeroCellSize { width: 0, height: 16 })
        ));
    }

    #[test]
    fn malformed_values_fail_to_load() {
        let result = from_toml("[deck]\nrestock_delay_ms = \"soon\"");
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = scratch_path("roundtrip");
        let mut settings = Settings::default();
        settings.seed = Some(7);
        settings.theme = ThemeVariant::EverforestLight;
        settings.save(&path).unwrap();

        let loaded = Settings::extract(
            Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(&path)),
        )
        .unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn load_creates_missing_file() {
        let path = scratch_path("create");
        let _ = fs::remove_dir_all(path.parent().unwrap());
        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings.cards, Settings::default().cards);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn frame_interval_follows_fps() {
        let display = DisplaySettings {
            fps: 50,
            ..DisplaySettings::default()
        };
        assert_eq!(display.frame_interval(), Duration::from_millis(20));
    }
}
