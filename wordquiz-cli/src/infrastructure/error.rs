use wordquiz_core::MessageError;
use wordquiz_p2p::DispatcherError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid message: {0}")]
    Message(#[from] MessageError),

    #[error("Dispatcher failed: {0}")]
    Dispatcher(#[from] DispatcherError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CliError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        CliError::InvalidConfig(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
