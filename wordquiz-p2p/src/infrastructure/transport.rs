use crate::infrastructure::error::{Result, TransportError};
use std::sync::Arc;
use wordquiz_core::Message;

/// Notifications raised by a transport
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Connection established (once per `initialize`)
    Connected,
    /// Connection torn down
    Disconnected,
    /// A message from another peer arrived
    MessageReceived(Message),
    /// Non-fatal transport failure
    Error(TransportError),
}

/// Receiver of transport notifications
///
/// Called from whatever context the transport delivers on (another peer's
/// task, an I/O thread), so implementations must not block.
pub trait TransportListener: Send + Sync {
    fn on_event(&self, event: TransportEvent);
}

/// Boundary every concrete network binding implements
pub trait Transport: Send {
    /// Human-readable name used in log lines
    fn peer_label(&self) -> &str;

    /// Install the listener that receives all further notifications
    fn subscribe(&mut self, listener: Arc<dyn TransportListener>);

    /// Remove the listener; nothing reaches it afterwards
    fn unsubscribe(&mut self);

    /// Establish connectivity and raise `Connected`
    fn initialize(&mut self) -> Result<()>;

    /// Stamp and transmit to every other peer. Failures surface as
    /// `TransportEvent::Error`, never to the caller.
    fn send(&mut self, msg: Message);

    /// Best-effort teardown, raises `Disconnected`
    fn shutdown(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn peer_label(&self) -> &str {
        (**self).peer_label()
    }

    fn subscribe(&mut self, listener: Arc<dyn TransportListener>) {
        (**self).subscribe(listener)
    }

    fn unsubscribe(&mut self) {
        (**self).unsubscribe()
    }

    fn initialize(&mut self) -> Result<()> {
        (**self).initialize()
    }

    fn send(&mut self, msg: Message) {
        (**self).send(msg)
    }

    fn shutdown(&mut self) -> Result<()> {
        (**self).shutdown()
    }
}
