pub mod error;
pub mod simulated;
pub mod transport;

pub use simulated::{SimulatedNetwork, SimulatedTransport};
pub use transport::{Transport, TransportEvent, TransportListener};
