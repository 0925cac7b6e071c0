//! Panel configuration
//!
//! Loaded from a TOML file holding the PIN-entry options and the panel's
//! button mapping and result messages. The file is only ever read.

use std::fs;
use std::path::{Path, PathBuf};

use pincode_core::{PincodeConfig, PincodeError};
use serde::Deserialize;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "panel.toml";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "pincode-panel";

/// Full panel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// PIN-entry options
    pub pincode: PincodeConfig,

    /// Button mapping and result messages
    #[serde(default)]
    pub panel: PanelSettings,
}

/// How the panel's buttons and messages are wired
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PanelSettings {
    /// Keypad button that clears the entry
    #[serde(default = "default_clear_signal")]
    pub clear_signal: String,

    /// Keypad button that submits the entry
    #[serde(default = "default_submit_signal")]
    pub submit_signal: String,

    /// Digital join of the backspace button
    #[serde(default = "default_backspace_join")]
    pub backspace_join: u32,

    /// Shown after a matching submit
    #[serde(default = "default_correct_message")]
    pub correct_message: String,

    /// Shown after a failed submit
    #[serde(default = "default_incorrect_message")]
    pub incorrect_message: String,

    /// Clear the result message as soon as the next input arrives
    #[serde(default = "default_clear_banner_on_input")]
    pub clear_banner_on_input: bool,
}

fn default_clear_signal() -> String {
    "Misc_1".to_string()
}

fn default_submit_signal() -> String {
    "Misc_2".to_string()
}

fn default_backspace_join() -> u32 {
    200
}

fn default_correct_message() -> String {
    "Password Correct".to_string()
}

fn default_incorrect_message() -> String {
    "Password Incorrect".to_string()
}

fn default_clear_banner_on_input() -> bool {
    true
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            clear_signal: default_clear_signal(),
            submit_signal: default_submit_signal(),
            backspace_join: default_backspace_join(),
            correct_message: default_correct_message(),
            incorrect_message: default_incorrect_message(),
            clear_banner_on_input: default_clear_banner_on_input(),
        }
    }
}

impl PanelConfig {
    /// Panel configuration with default panel settings
    pub fn new(pincode: PincodeConfig) -> Self {
        Self {
            pincode,
            panel: PanelSettings::default(),
        }
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to the platform default
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Self::config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load and validate configuration from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        tracing::debug!("Loaded panel config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check both the PIN options and the panel wiring
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pincode.validate()?;

        let panel = &self.panel;
        if panel.clear_signal.is_empty() || panel.submit_signal.is_empty() {
            return Err(ConfigError::InvalidPanel(
                "clear and submit signals must be named".to_string(),
            ));
        }
        if panel.clear_signal == panel.submit_signal {
            return Err(ConfigError::InvalidPanel(format!(
                "clear and submit both use signal {:?}",
                panel.clear_signal
            )));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] PincodeError),

    #[error("Invalid panel settings: {0}")]
    InvalidPanel(String),
}
