use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Corner of the main view the navigation chevrons sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChevronPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Navigation display settings. Only `debounce_ms` feeds the engine; the
/// other fields are read by the host when it draws the chevrons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Delay before a chevron shows its preview popover.
    pub popover_delay_ms: u64,
    pub chevron_position: ChevronPosition,
    /// Resting opacity of the chevrons; 0 shows them only on hover.
    pub chevron_opacity: f32,
    /// Quiet period before content changes trigger a new emphasis pass.
    pub debounce_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            popover_delay_ms: 300,
            chevron_position: ChevronPosition::default(),
            chevron_opacity: 0.3,
            debounce_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Percentage of each emphasized word shown in bold.
    pub fixation: u8,
    /// Emphasize every n-th word.
    pub saccade: u8,
    pub navigation: NavigationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixation: 50,
            saccade: 1,
            navigation: NavigationConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        self.validate()?;
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/bionic-reader");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Checks every value against the range the reader accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixation > 100 {
            return Err(ConfigError::Invalid {
                field: "fixation",
                reason: format!("must be between 0 and 100, got {}", self.fixation),
            });
        }
        if !(1..=5).contains(&self.saccade) {
            return Err(ConfigError::Invalid {
                field: "saccade",
                reason: format!("must be between 1 and 5, got {}", self.saccade),
            });
        }
        let opacity = self.navigation.chevron_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::Invalid {
                field: "navigation.chevron_opacity",
                reason: format!("must be between 0 and 1, got {opacity}"),
            });
        }
        let debounce = self.navigation.debounce_ms;
        if !(50..=200).contains(&debounce) {
            return Err(ConfigError::Invalid {
                field: "navigation.debounce_ms",
                reason: format!("must be between 50 and 200, got {debounce}"),
            });
        }
        Ok(())
    }
}
