use wordquiz_core::{ConsumerError, GameConsumer, RemoteHealth};

const DEFAULT_DECK: [&str; 12] = [
    "你好", "谢谢", "朋友", "老师", "学生", "中国", "水果", "天气", "电脑", "音乐", "火车", "医生",
];

/// Stand-in for the game scene: draws words from a deck and tracks the
/// opponent's health from the answer results it hears about
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    name: String,
    deck: Vec<String>,
    next_card: usize,
    current_word: Option<String>,
    questions_loaded: u32,
    answers_seen: u32,
    correct_seen: u32,
    remote_health: RemoteHealth,
}

impl SimulatedPlayer {
    pub fn new(name: impl Into<String>, initial_health: u32) -> Self {
        Self::with_deck(
            name,
            initial_health,
            DEFAULT_DECK.iter().map(|w| w.to_string()).collect(),
        )
    }

    pub fn with_deck(name: impl Into<String>, initial_health: u32, deck: Vec<String>) -> Self {
        Self {
            name: name.into(),
            deck,
            next_card: 0,
            current_word: None,
            questions_loaded: 0,
            answers_seen: 0,
            correct_seen: 0,
            remote_health: RemoteHealth::new(initial_health),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn questions_loaded(&self) -> u32 {
        self.questions_loaded
    }

    pub fn answers_seen(&self) -> u32 {
        self.answers_seen
    }

    pub fn correct_seen(&self) -> u32 {
        self.correct_seen
    }

    pub fn remote_health(&self) -> &RemoteHealth {
        &self.remote_health
    }
}

impl GameConsumer for SimulatedPlayer {
    fn load_next_question(&mut self) -> Result<(), ConsumerError> {
        if self.deck.is_empty() {
            return Err(ConsumerError::NoQuestion(format!(
                "{} has an empty deck",
                self.name
            )));
        }

        // Deck cycles
        let word = self.deck[self.next_card % self.deck.len()].clone();
        self.next_card += 1;
        self.questions_loaded += 1;

        tracing::debug!("{} drew question #{}: {}", self.name, self.questions_loaded, word);
        self.current_word = Some(word);
        Ok(())
    }

    fn on_remote_answer_result(&mut self, is_correct: bool) -> Result<(), ConsumerError> {
        if self.remote_health.is_dead() {
            return Err(ConsumerError::Rejected(format!(
                "{} got an answer result for an opponent already at 0 health",
                self.name
            )));
        }

        self.answers_seen += 1;
        if is_correct {
            self.correct_seen += 1;
        }

        let remaining = self.remote_health.apply_answer_result(is_correct);
        if remaining == 0 {
            tracing::info!("{} sees the opponent drop to 0 health", self.name);
        }
        Ok(())
    }
}
