use super::SimulatedPlayer;
use crate::infrastructure::Result;
use wordquiz_core::{EventKind, Message, PlayerId};
use wordquiz_p2p::{BatchReport, Dispatcher, SimulatedNetwork, SimulatedTransport};

const LISTENER: &str = "Listener";

/// How the listener peer handled the probe message
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub sent: Message,
    pub report: BatchReport,
    pub questions_loaded: u32,
    pub answers_seen: u32,
}

/// Send one message from `sender` to a fresh listener peer and run a single
/// dispatch pass on the listener
pub fn run_probe(
    kind: &str,
    payload: Option<serde_json::Value>,
    sender: &str,
) -> Result<ProbeOutcome> {
    let network = SimulatedNetwork::new();
    let sender_id = PlayerId::new(sender)?;

    let mut listener = Dispatcher::new(
        PlayerId::new(LISTENER)?,
        SimulatedTransport::with_network(network.clone(), LISTENER),
        SimulatedPlayer::new(LISTENER, 3),
    );
    let mut probe = Dispatcher::new(
        sender_id.clone(),
        SimulatedTransport::with_network(network, sender),
        SimulatedPlayer::new(sender, 3),
    );
    listener.start()?;
    probe.start()?;

    let mut message = Message::new(EventKind::from(kind), sender_id);
    if let Some(payload) = payload {
        message = message.with_payload(payload);
    }

    tracing::info!("Probe {} sends {}", sender, message.event_kind());
    probe.send(message.clone());
    let report = listener.tick();

    probe.shutdown();
    listener.shutdown();

    let player = listener.consumer();
    Ok(ProbeOutcome {
        sent: message,
        report,
        questions_loaded: player.questions_loaded(),
        answers_seen: player.answers_seen(),
    })
}
