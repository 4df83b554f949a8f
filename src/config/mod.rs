//! Persisted configuration for the Pomodoro Timer.
//!
//! The configuration lives in a small JSON file, either a per-user dotfile in
//! the home directory or a per-project file in the working directory. On the
//! first run the defaults are written out; afterwards the file is merged over
//! the defaults key by key.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

pub use crate::types::ConfigError;
use crate::types::TimerConfig;

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = ".pomodoro.json";

/// Result of loading the configuration file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Typed configuration
    pub config: TimerConfig,
    /// Merged JSON document, including keys the timer does not know about
    pub document: Map<String, Value>,
    /// Whether the file was created by this load
    pub created: bool,
    /// Location of the file
    pub path: PathBuf,
}

/// Reads and initializes the configuration file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for `~/.pomodoro.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn home() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    /// Creates a store for `.pomodoro.json` in the current directory.
    pub fn project() -> Self {
        Self::new(CONFIG_FILE_NAME)
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, writing `defaults` if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, is not a JSON
    /// object, holds ill-typed values, or fails validation.
    pub fn load_or_init(&self, defaults: &TimerConfig) -> Result<LoadedConfig, ConfigError> {
        let default_document = to_object(defaults);

        if !self.path.exists() {
            self.write(&default_document)?;
            info!("設定ファイルを作成しました: {}", self.path.display());
            return Ok(LoadedConfig {
                config: defaults.clone(),
                document: default_document,
                created: true,
                path: self.path.clone(),
            });
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let Value::Object(overrides) = value else {
            return Err(ConfigError::NotAnObject(self.path.clone()));
        };

        let document = merge_objects(&default_document, &overrides);
        let config: TimerConfig = serde_json::from_value(Value::Object(document.clone()))
            .map_err(|source| ConfigError::Invalid {
                path: self.path.clone(),
                source,
            })?;
        config.validate()?;

        debug!("設定ファイルを読み込みました: {}", self.path.display());

        Ok(LoadedConfig {
            config,
            document,
            created: false,
            path: self.path.clone(),
        })
    }

    /// Writes a document as pretty-printed JSON, creating parent directories.
    fn write(&self, document: &Map<String, Value>) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut json = serde_json::to_string_pretty(document)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        json.push('\n');

        fs::write(&self.path, json).map_err(write_err)
    }
}

/// Shallow-merges `overrides` over `defaults`.
///
/// Keys from `overrides` win; keys only in `defaults` are kept; keys only in
/// `overrides` are added. Nested objects are replaced, not merged.
pub fn merge_objects(
    defaults: &Map<String, Value>,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

fn to_object(config: &TimerConfig) -> Map<String, Value> {
    match serde_json::to_value(config) {
        Ok(Value::Object(map)) => map,
        // TimerConfig is a plain struct of integers and a bool
        _ => Map::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
