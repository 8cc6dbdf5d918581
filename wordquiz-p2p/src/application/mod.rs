mod config;
mod dispatcher;
mod error;
mod router;
#[cfg(feature = "native")]
pub mod runtime;
mod stats;

pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, DispatcherState};
pub use error::{DispatchError, DispatcherError};
pub use router::{route, Routed};
#[cfg(feature = "native")]
pub use runtime::DispatchLoop;
pub use stats::{BatchReport, DispatchStats};
