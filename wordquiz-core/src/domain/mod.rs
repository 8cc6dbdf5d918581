mod event_kind;
mod message;
mod player;
mod timestamp;

pub use event_kind::EventKind;
pub use message::{Message, MessageError};
pub use player::PlayerId;
pub use timestamp::Timestamp;
