use wordquiz_core::{ConsumerError, GameConsumer, RemoteHealth};

/// Consumer that records every call it receives
#[derive(Debug, Default)]
pub struct RecordingConsumer {
    pub questions_loaded: usize,
    pub answer_results: Vec<bool>,
    pub remote_health: RemoteHealth,
    /// Panic on the next `load_next_question` call
    pub panic_on_question: bool,
}

impl GameConsumer for RecordingConsumer {
    fn load_next_question(&mut self) -> Result<(), ConsumerError> {
        if std::mem::take(&mut self.panic_on_question) {
            panic!("question table is corrupt");
        }
        self.questions_loaded += 1;
        Ok(())
    }

    fn on_remote_answer_result(&mut self, is_correct: bool) -> Result<(), ConsumerError> {
        self.answer_results.push(is_correct);
        self.remote_health.apply_answer_result(is_correct);
        Ok(())
    }
}
