// Domain layer (peer identity)
pub mod domain;

// Application layer (dispatch)
pub mod application;

// Infrastructure layer (transports)
pub mod infrastructure;

// Re-exports for convenience
#[cfg(feature = "native")]
pub use application::DispatchLoop;
pub use application::{
    BatchReport, DispatchError, DispatchStats, Dispatcher, DispatcherConfig, DispatcherError,
    DispatcherState, Routed,
};
pub use domain::PeerId;
pub use infrastructure::error::{Result, TransportError};
pub use infrastructure::{
    SimulatedNetwork, SimulatedTransport, Transport, TransportEvent, TransportListener,
};
