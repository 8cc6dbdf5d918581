mod buffer;
mod consumer;
mod health;

pub use buffer::MessageBuffer;
pub use consumer::{ConsumerError, GameConsumer};
pub use health::RemoteHealth;
