use crate::application::DispatchError;
use wordquiz_core::{EventKind, GameConsumer, Message, PlayerId};

/// What the routing table did with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// `load_next_question` was called
    QuestionLoaded,
    /// `on_remote_answer_result` was called with this value
    AnswerResult(bool),
    /// Our own broadcast came back; nothing to re-apply
    SkippedSelfOrigin,
}

/// Route one message to the consumer by its event kind
///
/// `request-draw-question` is always honored, whoever sent it, while a
/// `broadcast-question` from the local player is skipped.
pub fn route<C: GameConsumer + ?Sized>(
    local_player_id: &PlayerId,
    consumer: &mut C,
    msg: &Message,
) -> Result<Routed, DispatchError> {
    match msg.event_kind() {
        EventKind::RequestDrawQuestion => {
            tracing::debug!("📥 Remote request to draw a question from {}", msg.sender_id());
            consumer.load_next_question()?;
            Ok(Routed::QuestionLoaded)
        }

        EventKind::BroadcastQuestion => {
            if msg.sender_id() == local_player_id {
                tracing::debug!("↩️  Own broadcast-question, not re-applied");
                return Ok(Routed::SkippedSelfOrigin);
            }
            consumer.load_next_question()?;
            Ok(Routed::QuestionLoaded)
        }

        EventKind::AnswerResult => {
            let is_correct =
                msg.payload()
                    .as_bool()
                    .ok_or_else(|| DispatchError::PayloadTypeMismatch {
                        kind: msg.event_kind().to_string(),
                        expected: "a boolean",
                        found: json_type_name(msg.payload()).to_string(),
                    })?;
            tracing::debug!("📥 Answer result from {}: {}", msg.sender_id(), is_correct);
            consumer.on_remote_answer_result(is_correct)?;
            Ok(Routed::AnswerResult(is_correct))
        }

        other => Err(DispatchError::UnknownEventKind(other.to_string())),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
