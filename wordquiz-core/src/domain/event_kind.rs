use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic purpose of a message
///
/// Wire names are kebab-case. A name outside the known set decodes into
/// `Unknown` so that one bad message cannot fail the decode of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// Host assigns the turn order
    TurnOrder,
    /// Ask the receiving peer to draw the next question
    RequestDrawQuestion,
    /// A peer drew a question and announces it
    BroadcastQuestion,
    /// A player submits an answer
    SubmitAnswer,
    /// Outcome of an answer (payload: bool)
    AnswerResult,
    /// Health changed
    UpdateHealth,
    /// A player ran out of health
    PlayerDied,
    /// Advance to the next turn
    NextTurn,
    /// The game ended
    GameOver,
    /// Anything the bus does not recognize, keeps the raw wire name
    Unknown(String),
}

impl EventKind {
    /// Every kind of the closed set, in wire order
    pub const KNOWN: [EventKind; 9] = [
        EventKind::TurnOrder,
        EventKind::RequestDrawQuestion,
        EventKind::BroadcastQuestion,
        EventKind::SubmitAnswer,
        EventKind::AnswerResult,
        EventKind::UpdateHealth,
        EventKind::PlayerDied,
        EventKind::NextTurn,
        EventKind::GameOver,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::TurnOrder => "turn-order",
            EventKind::RequestDrawQuestion => "request-draw-question",
            EventKind::BroadcastQuestion => "broadcast-question",
            EventKind::SubmitAnswer => "submit-answer",
            EventKind::AnswerResult => "answer-result",
            EventKind::UpdateHealth => "update-health",
            EventKind::PlayerDied => "player-died",
            EventKind::NextTurn => "next-turn",
            EventKind::GameOver => "game-over",
            EventKind::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EventKind::Unknown(_))
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        EventKind::KNOWN
            .iter()
            .find(|kind| kind.as_str() == name)
            .cloned()
            .unwrap_or_else(|| EventKind::Unknown(name.to_string()))
    }
}

impl From<String> for EventKind {
    fn from(name: String) -> Self {
        match EventKind::from(name.as_str()) {
            EventKind::Unknown(_) => EventKind::Unknown(name),
            known => known,
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for EventKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EventKind::from(s))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for EventKind {
    fn schema_name() -> String {
        "EventKind".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            enum_values: Some(
                EventKind::KNOWN
                    .iter()
                    .map(|kind| serde_json::Value::from(kind.as_str()))
                    .collect(),
            ),
            ..Default::default()
        }
        .into()
    }
}
