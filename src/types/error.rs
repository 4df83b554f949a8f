//! Configuration error types.
//!
//! Validation failures are raised when an engine is constructed; file errors
//! are raised while loading the persisted configuration and are fatal at
//! startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating, reading, or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A duration or count is zero.
    #[error("設定値 '{0}' は1以上で指定してください")]
    NotPositive(&'static str),

    /// The home directory could not be determined.
    #[error("ホームディレクトリが見つかりません")]
    NoHomeDir,

    /// The configuration file could not be read.
    #[error("設定ファイルの読み込みに失敗しました ({path}): {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("設定ファイルの書き込みに失敗しました ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("設定ファイルのJSONが不正です ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file is valid JSON but not an object.
    #[error("設定ファイルはJSONオブジェクトである必要があります ({0})")]
    NotAnObject(PathBuf),

    /// A known key holds a value of the wrong type.
    #[error("設定ファイルの値が不正です ({path}): {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Returns true if the error comes from the contents of the file.
    #[must_use]
    pub fn is_malformed_file(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::NotAnObject(_) | Self::Invalid { .. }
        )
    }
}
