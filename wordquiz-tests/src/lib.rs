use cucumber::World;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use wordquiz_core::{ConsumerError, GameConsumer, Message, MessageBuffer, PlayerId, RemoteHealth};
use wordquiz_p2p::{
    Dispatcher, DispatcherConfig, SimulatedNetwork, SimulatedTransport, Transport,
    TransportError, TransportEvent, TransportListener,
};

/// Dispatch interval used by every scenario
pub const TEST_INTERVAL_MS: u64 = 10;

pub type PeerDispatcher = Dispatcher<SimulatedTransport, ScriptedConsumer>;

/// Game consumer that records what the dispatcher asked of it
#[derive(Debug, Default)]
pub struct ScriptedConsumer {
    pub questions_loaded: u32,
    pub answer_results: Vec<bool>,
    pub remote_health: RemoteHealth,
}

impl GameConsumer for ScriptedConsumer {
    fn load_next_question(&mut self) -> Result<(), ConsumerError> {
        self.questions_loaded += 1;
        Ok(())
    }

    fn on_remote_answer_result(&mut self, is_correct: bool) -> Result<(), ConsumerError> {
        self.answer_results.push(is_correct);
        self.remote_health.apply_answer_result(is_correct);
        Ok(())
    }
}

/// Transport listener that keeps every notification
#[derive(Debug, Default)]
pub struct Inbox {
    events: Mutex<Vec<TransportEvent>>,
}

impl Inbox {
    pub fn received(&self) -> Vec<Message> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TransportEvent::MessageReceived(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<TransportError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TransportEvent::Error(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    fn events(&self) -> Vec<TransportEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TransportListener for Inbox {
    fn on_event(&self, event: TransportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Debug, World, Default)]
pub struct BusWorld {
    /// Isolated network per scenario
    pub network: SimulatedNetwork,

    /// Standalone buffer for buffer scenarios
    pub buffer: MessageBuffer,

    /// Result of the last drain
    pub drained: Vec<Message>,

    /// Bare transports by peer name (transport scenarios)
    pub transports: BTreeMap<String, SimulatedTransport>,

    /// Listener of each bare transport
    pub inboxes: BTreeMap<String, Arc<Inbox>>,

    /// Dispatchers by player name (dispatch scenarios)
    pub peers: BTreeMap<String, PeerDispatcher>,
}

impl BusWorld {
    pub fn player_id(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap_or_else(|e| panic!("Invalid player '{}': {}", name, e))
    }

    /// Register a bare transport with an inbox, optionally initializing it
    pub fn add_transport(&mut self, name: &str, initialize: bool) {
        let mut transport = SimulatedTransport::with_network(self.network.clone(), name);
        let inbox = Arc::new(Inbox::default());
        transport.subscribe(inbox.clone());
        if initialize {
            transport.initialize().expect("initialize failed");
        }
        self.transports.insert(name.to_string(), transport);
        self.inboxes.insert(name.to_string(), inbox);
    }

    pub fn transport(&mut self, name: &str) -> &mut SimulatedTransport {
        self.transports
            .get_mut(name)
            .unwrap_or_else(|| panic!("Transport '{}' not found", name))
    }

    pub fn inbox(&self, name: &str) -> &Inbox {
        self.inboxes
            .get(name)
            .unwrap_or_else(|| panic!("Inbox '{}' not found", name))
    }

    /// Create and start a dispatcher for `name`
    pub fn add_peer(&mut self, name: &str) {
        let config = DispatcherConfig::new().with_dispatch_interval(TEST_INTERVAL_MS);
        let mut dispatcher = Dispatcher::with_config(
            Self::player_id(name),
            SimulatedTransport::with_network(self.network.clone(), name),
            ScriptedConsumer::default(),
            config,
        );
        dispatcher.start().expect("dispatcher failed to start");
        self.peers.insert(name.to_string(), dispatcher);
    }

    pub fn peer(&mut self, name: &str) -> &mut PeerDispatcher {
        self.peers
            .get_mut(name)
            .unwrap_or_else(|| panic!("Player '{}' not found", name))
    }

    /// Split a `"P1, P2, P3"` list
    pub fn names(list: &str) -> Vec<String> {
        list.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
