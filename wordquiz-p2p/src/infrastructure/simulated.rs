use crate::domain::PeerId;
use crate::infrastructure::error::{Result, TransportError};
use crate::infrastructure::transport::{Transport, TransportEvent, TransportListener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use wordquiz_core::{Message, Timestamp};

/// One registered peer as seen by the rest of the network
struct PeerEndpoint {
    id: PeerId,
    label: String,
    listener: RwLock<Option<Arc<dyn TransportListener>>>,
    torn_down: AtomicBool,
}

impl PeerEndpoint {
    /// Deliver without holding any registry lock
    fn notify(&self, event: TransportEvent) {
        let listener = self
            .listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match listener {
            Some(listener) => listener.on_event(event),
            None => tracing::trace!("🔇 {} has no listener, event dropped", self.label),
        }
    }

    /// Delivery from another peer; a torn-down peer gets nothing, even if
    /// it was still in the sender's snapshot of the registry
    fn deliver(&self, event: TransportEvent) {
        if self.torn_down.load(Ordering::Acquire) {
            return;
        }
        self.notify(event);
    }

    fn set_listener(&self, listener: Option<Arc<dyn TransportListener>>) {
        *self.listener.write().unwrap_or_else(PoisonError::into_inner) = listener;
    }
}

/// Peer registry shared by every simulated transport on one "network"
///
/// Cloning yields another handle to the same registry. Peers are kept in
/// registration order, which is also the delivery order of a broadcast.
#[derive(Clone, Default)]
pub struct SimulatedNetwork {
    peers: Arc<RwLock<Vec<Arc<PeerEndpoint>>>>,
}

impl SimulatedNetwork {
    /// Isolated registry (one per test or per simulation)
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry
    pub fn global() -> Self {
        static GLOBAL: OnceLock<SimulatedNetwork> = OnceLock::new();
        GLOBAL.get_or_init(SimulatedNetwork::new).clone()
    }

    /// Number of currently registered peers
    pub fn peer_count(&self) -> usize {
        self.peers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Labels of the registered peers, in registration order
    pub fn peer_labels(&self) -> Vec<String> {
        self.peers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|peer| peer.label.clone())
            .collect()
    }

    fn register(&self, endpoint: Arc<PeerEndpoint>) {
        let mut peers = self.peers.write().unwrap_or_else(PoisonError::into_inner);
        peers.push(endpoint);
    }

    /// Returns false if the peer was already gone
    fn deregister(&self, id: PeerId) -> bool {
        let mut peers = self.peers.write().unwrap_or_else(PoisonError::into_inner);
        let before = peers.len();
        peers.retain(|peer| peer.id != id);
        peers.len() != before
    }

    /// Snapshot of every peer except `id`; the lock is released on return
    fn others(&self, id: PeerId) -> Vec<Arc<PeerEndpoint>> {
        self.peers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|peer| peer.id != id)
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for SimulatedNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedNetwork")
            .field("peers", &self.peer_labels())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Created,
    Connected,
    Closed,
}

/// Transport that broadcasts straight into the other peers of a
/// `SimulatedNetwork`, for local multi-peer play without a real connection
pub struct SimulatedTransport {
    network: SimulatedNetwork,
    endpoint: Arc<PeerEndpoint>,
    state: LinkState,
}

impl SimulatedTransport {
    /// Register a new peer on the process-wide network
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_network(SimulatedNetwork::global(), label)
    }

    /// Register a new peer on `network`
    pub fn with_network(network: SimulatedNetwork, label: impl Into<String>) -> Self {
        let endpoint = Arc::new(PeerEndpoint {
            id: PeerId::new(),
            label: label.into(),
            listener: RwLock::new(None),
            torn_down: AtomicBool::new(false),
        });

        network.register(endpoint.clone());

        tracing::debug!(
            "🔌 SimulatedTransport: peer {} registered ({} on network)",
            endpoint.label,
            network.peer_count()
        );

        Self {
            network,
            endpoint,
            state: LinkState::Created,
        }
    }

    pub fn peer_id(&self) -> PeerId {
        self.endpoint.id
    }

    pub fn network(&self) -> &SimulatedNetwork {
        &self.network
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    fn report_error(&self, error: TransportError) {
        tracing::error!("❌ {}: {}", self.endpoint.label, error);
        self.endpoint.notify(TransportEvent::Error(error));
    }
}

impl Transport for SimulatedTransport {
    fn peer_label(&self) -> &str {
        &self.endpoint.label
    }

    fn subscribe(&mut self, listener: Arc<dyn TransportListener>) {
        self.endpoint.set_listener(Some(listener));
    }

    fn unsubscribe(&mut self) {
        self.endpoint.set_listener(None);
    }

    fn initialize(&mut self) -> Result<()> {
        if self.state == LinkState::Closed {
            return Err(TransportError::Closed);
        }

        self.state = LinkState::Connected;
        tracing::info!("🟢 {} initialized", self.endpoint.label);

        self.endpoint.notify(TransportEvent::Connected);

        // Symmetric handshake: everyone already here sees us connect too
        for peer in self.network.others(self.endpoint.id) {
            peer.deliver(TransportEvent::Connected);
        }

        Ok(())
    }

    fn send(&mut self, mut msg: Message) {
        if self.state != LinkState::Connected {
            self.report_error(TransportError::NotConnected);
            return;
        }

        msg.stamp_sent(Timestamp::now());

        let data = match serde_json::to_vec(&msg) {
            Ok(data) => data,
            Err(e) => {
                self.report_error(TransportError::Encode(e.to_string()));
                return;
            }
        };

        let recipients = self.network.others(self.endpoint.id);
        tracing::trace!(
            "📢 {} broadcasting {} to {} peers ({} bytes)",
            self.endpoint.label,
            msg.event_kind(),
            recipients.len(),
            data.len()
        );

        for peer in recipients {
            match serde_json::from_slice::<Message>(&data) {
                Ok(mut received) => {
                    received.stamp_received(Timestamp::now());
                    peer.deliver(TransportEvent::MessageReceived(received));
                }
                Err(e) => self.report_error(TransportError::Decode(e.to_string())),
            }
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.state == LinkState::Closed {
            return Ok(());
        }

        self.endpoint.torn_down.store(true, Ordering::Release);
        self.network.deregister(self.endpoint.id);
        self.state = LinkState::Closed;

        tracing::info!("🔴 {} shut down", self.endpoint.label);
        self.endpoint.notify(TransportEvent::Disconnected);

        Ok(())
    }
}

impl Drop for SimulatedTransport {
    fn drop(&mut self) {
        self.endpoint.torn_down.store(true, Ordering::Release);
        if self.network.deregister(self.endpoint.id) {
            tracing::debug!("🔌 {} dropped without shutdown", self.endpoint.label);
        }
    }
}

impl std::fmt::Debug for SimulatedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedTransport")
            .field("peer", &self.endpoint.label)
            .field("id", &self.endpoint.id)
            .field("state", &self.state)
            .finish()
    }
}
