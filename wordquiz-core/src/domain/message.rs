use crate::domain::{EventKind, PlayerId, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Errors raised while building a message
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("Sender id must not be empty")]
    EmptySender,
}

/// Wire-level event record exchanged between peers
///
/// The bus never looks inside `payload`; its shape is decided by
/// `event_kind` and interpreted by whichever consumer the kind routes to.
/// `timestamp` is stamped by the transport on send, `received` by the
/// receiving transport on delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    event_kind: EventKind,

    sender_id: PlayerId,

    #[serde(rename = "timestamp_ms", default)]
    timestamp: Timestamp,

    #[serde(default)]
    turn_index: i32,

    #[serde(default)]
    payload: serde_json::Value,

    #[serde(rename = "received_ms", default, skip_serializing_if = "Option::is_none")]
    received: Option<Timestamp>,
}

impl Message {
    /// Create an unstamped message with a `null` payload
    pub fn new(event_kind: EventKind, sender_id: PlayerId) -> Self {
        Self {
            event_kind,
            sender_id,
            timestamp: Timestamp::UNSET,
            turn_index: 0,
            payload: serde_json::Value::Null,
            received: None,
        }
    }

    pub fn request_draw_question(sender_id: PlayerId) -> Self {
        Self::new(EventKind::RequestDrawQuestion, sender_id)
    }

    pub fn broadcast_question(sender_id: PlayerId) -> Self {
        Self::new(EventKind::BroadcastQuestion, sender_id)
    }

    pub fn answer_result(sender_id: PlayerId, is_correct: bool) -> Self {
        Self::new(EventKind::AnswerResult, sender_id).with_payload(is_correct)
    }

    pub fn with_payload(mut self, payload: impl Into<serde_json::Value>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_turn_index(mut self, turn_index: i32) -> Self {
        self.turn_index = turn_index;
        self
    }

    pub fn event_kind(&self) -> &EventKind {
        &self.event_kind
    }

    pub fn sender_id(&self) -> &PlayerId {
        &self.sender_id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn turn_index(&self) -> i32 {
        self.turn_index
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn received(&self) -> Option<Timestamp> {
        self.received
    }

    /// Send-side stamp. Transports call this, game code never does.
    pub fn stamp_sent(&mut self, at: Timestamp) {
        self.timestamp = at;
    }

    /// Receive-side stamp, set by the transport that delivers the message
    pub fn stamp_received(&mut self, at: Timestamp) {
        self.received = Some(at);
    }

    /// Delivery latency, when both stamps are present
    pub fn latency_ms(&self) -> Option<i64> {
        match self.received {
            Some(received) if self.timestamp.is_set() => {
                Some(received.millis_since(self.timestamp))
            }
            _ => None,
        }
    }
}
