#![allow(dead_code)]

pub mod recording_consumer;

use recording_consumer::RecordingConsumer;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wordquiz_core::PlayerId;
use wordquiz_p2p::{Dispatcher, DispatcherConfig, SimulatedNetwork, SimulatedTransport};

pub type PeerDispatcher = Dispatcher<SimulatedTransport, RecordingConsumer>;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

pub fn player(name: &str) -> PlayerId {
    PlayerId::new(name).unwrap()
}

/// N simulated peers `P1..PN` on one isolated network, each with its own
/// dispatcher and recording consumer
pub struct PeerFixture {
    pub network: SimulatedNetwork,
    pub peers: Vec<PeerDispatcher>,
}

impl PeerFixture {
    pub fn new(count: usize) -> Self {
        Self::with_interval(count, 10)
    }

    pub fn with_interval(count: usize, interval_ms: u64) -> Self {
        let network = SimulatedNetwork::new();
        let config = DispatcherConfig::new().with_dispatch_interval(interval_ms);

        let peers = (1..=count)
            .map(|i| {
                let name = format!("P{}", i);
                let transport = SimulatedTransport::with_network(network.clone(), name.clone());
                Dispatcher::with_config(
                    player(&name),
                    transport,
                    RecordingConsumer::default(),
                    config.clone(),
                )
            })
            .collect();

        Self { network, peers }
    }

    /// Start every dispatcher (connects all transports)
    pub fn start_all(&mut self) {
        for peer in self.peers.iter_mut() {
            peer.start().unwrap();
        }
    }

    /// One dispatch interval for every peer
    pub fn tick_all(&mut self) {
        for peer in self.peers.iter_mut() {
            peer.tick();
        }
    }

    /// Peer by 1-based player number
    pub fn peer(&mut self, number: usize) -> &mut PeerDispatcher {
        &mut self.peers[number - 1]
    }

    pub fn interval(&self) -> Duration {
        self.peers[0].config().dispatch_interval()
    }
}
