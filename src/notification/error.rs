//! Notification error types.
//!
//! Alert failures never stop the timer; callers log them and carry on.

use thiserror::Error;

/// Errors that can occur while dispatching a desktop alert.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// No alert command is known for this platform.
    #[error("このプラットフォームではアラートに対応していません: {0}")]
    UnsupportedPlatform(&'static str),

    /// The alert command could not be started.
    #[error("アラートコマンド '{command}' の起動に失敗しました: {source}")]
    SpawnFailed {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Generic alert failure.
    #[error("アラートの送信に失敗しました: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform(_) => "アラートなしでタイマーを続行します",
            Self::SpawnFailed { command: "xmessage", .. } => {
                "xmessage をインストールしてください (x11-utils)"
            }
            Self::SpawnFailed { .. } => "アラートコマンドのパスを確認してください",
            Self::SendFailed(_) => "アプリケーションを再起動してください",
        }
    }
}
