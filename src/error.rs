use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogRouterError {
    #[error("Invalid webhook URL supplied: {0}")]
    InvalidWebhookUrl(String),

    #[error("A valid log channel for key '{0}' was not found!")]
    LogDestinationNotFound(String),

    #[error("Discord API error: {0}")]
    Transport(String),

    #[error("Error getting channel {channel_id} for log channel {key}: {reason}")]
    ChannelResolution {
        key: String,
        channel_id: u64,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used to tell startup failures from runtime ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfig,
    NotFound,
    Transport,
    Internal,
}

impl LogRouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidWebhookUrl(_)
            | Self::ChannelResolution { .. }
            | Self::Config(_)
            | Self::Serde(_) => ErrorKind::InvalidConfig,
            Self::LogDestinationNotFound(_) => ErrorKind::NotFound,
            Self::Transport(_) | Self::Io(_) => ErrorKind::Transport,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Errors that must stop the process when raised while resolving log destinations.
    pub fn is_startup_fatal(&self) -> bool {
        self.kind() == ErrorKind::InvalidConfig
    }
}

impl From<serenity::Error> for LogRouterError {
    fn from(e: serenity::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<reqwest::Error> for LogRouterError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogRouterError>;
