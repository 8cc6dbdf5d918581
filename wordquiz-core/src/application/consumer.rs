/// Failure raised by game logic while handling a routed message
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConsumerError {
    #[error("No question available: {0}")]
    NoQuestion(String),

    #[error("Consumer rejected message: {0}")]
    Rejected(String),
}

/// Game-logic side of the bus (turn/question controller)
///
/// The dispatcher calls these from its dispatch loop, one message at a time.
pub trait GameConsumer {
    /// Draw and present the next question
    fn load_next_question(&mut self) -> Result<(), ConsumerError>;

    /// A remote player's answer was judged
    fn on_remote_answer_result(&mut self, is_correct: bool) -> Result<(), ConsumerError>;
}

impl<C: GameConsumer + ?Sized> GameConsumer for Box<C> {
    fn load_next_question(&mut self) -> Result<(), ConsumerError> {
        (**self).load_next_question()
    }

    fn on_remote_answer_result(&mut self, is_correct: bool) -> Result<(), ConsumerError> {
        (**self).on_remote_answer_result(is_correct)
    }
}
