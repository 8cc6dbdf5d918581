/// Transport-level errors
///
/// Reported through `TransportEvent::Error` (and returned from
/// `initialize`/`shutdown`); never fatal to the dispatcher.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport is not connected")]
    NotConnected,

    #[error("Transport is closed")]
    Closed,

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Shutdown failed: {0}")]
    ShutdownFailed(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
