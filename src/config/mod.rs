//! Configuration module for askr
//!
//! User level defaults for every prompt: question marks, interrupt behaviour,
//! vi mode, style classes and key binding overrides.
//!
//! Settings are read from `config.toml` in the user's config directory and
//! may be overridden by `ASKR_*` environment variables, with `__` separating
//! nested keys:
//!
//! ```text
//! ASKR_VI_MODE=true
//! ASKR_RAISE_KEYBOARD_INTERRUPT=false
//! ASKR_STYLE__QUESTIONMARK="#ff0000 bold"
//! ASKR_KEYBINDINGS__SKIP=ctrl-s
//! ```
//!
//! Nothing is loaded implicitly: callers load an [`AskrConfig`] and hand it
//! to prompt builders.

use crate::keybinds::KeybindOverrides;
use crate::style::Style;
use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "ASKR";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AskrConfig {
    /// Use vi editing keys instead of emacs
    pub vi_mode: bool,

    /// Raise an error on ctrl-c instead of returning no answer
    pub raise_keyboard_interrupt: bool,

    /// Mark shown before unanswered questions
    pub qmark: String,

    /// Mark shown before answered questions
    pub amark: String,

    /// Style overrides by class name
    pub style: HashMap<String, String>,

    /// Key binding overrides by action name
    pub keybindings: KeybindOverrides,
}

impl Default for AskrConfig {
    fn default() -> Self {
        Self {
            vi_mode: false,
            raise_keyboard_interrupt: true,
            qmark: "?".to_string(),
            amark: "?".to_string(),
            style: HashMap::new(),
            keybindings: KeybindOverrides::new(),
        }
    }
}

impl AskrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("askr").join("config.toml"))
    }

    /// Load configuration from the user config file and the environment
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or an environment override
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, None)
    }

    /// Load configuration from `path`, layering environment overrides
    ///
    /// `env` replaces the process environment as the override source when
    /// given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an override cannot be parsed.
    pub fn load_from(path: &Path, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(loaded)
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolve the style overrides on top of the default classes
    ///
    /// # Errors
    ///
    /// Returns [`crate::PromptError::InvalidArgument`] for unparsable style strings.
    pub fn resolved_style(&self) -> crate::Result<Style> {
        Style::with_overrides(&self.style)
    }
}
