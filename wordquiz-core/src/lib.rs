// Domain layer (wire model)
pub mod domain;

// Application layer (buffering + consumer boundary)
pub mod application;

pub use application::{ConsumerError, GameConsumer, MessageBuffer, RemoteHealth};
pub use domain::{EventKind, Message, MessageError, PlayerId, Timestamp};
