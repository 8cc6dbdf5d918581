use crate::application::DispatcherState;
use crate::infrastructure::error::TransportError;
use wordquiz_core::ConsumerError;

/// Failure while routing a single message
///
/// Caught at message granularity: the batch always continues.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No route for event kind '{0}'")]
    UnknownEventKind(String),

    #[error("Payload of '{kind}' should be {expected}, got {found}")]
    PayloadTypeMismatch {
        kind: String,
        expected: &'static str,
        found: String,
    },

    #[error("Consumer failed: {0}")]
    Consumer(#[from] ConsumerError),

    #[error("Consumer panicked: {0}")]
    Panicked(String),
}

impl DispatchError {
    /// Dropped-message conditions are warnings; consumer failures are errors
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            DispatchError::UnknownEventKind(_) | DispatchError::PayloadTypeMismatch { .. }
        )
    }
}

/// Lifecycle errors of a dispatcher
#[derive(Debug, thiserror::Error)]
pub enum DispatcherError {
    #[error("Dispatcher is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: DispatcherState,
        actual: DispatcherState,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Dispatch loop is gone")]
    ChannelClosed,

    #[error("Dispatch loop task failed: {0}")]
    LoopFailed(String),
}

pub type Result<T> = std::result::Result<T, DispatcherError>;
