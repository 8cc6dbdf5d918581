use serde::{Deserialize, Serialize};

/// Health of the remote player, driven by answer results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHealth {
    current: u32,
    initial: u32,
    damage_per_wrong: u32,
}

impl RemoteHealth {
    pub fn new(initial: u32) -> Self {
        Self::with_damage(initial, 1)
    }

    pub fn with_damage(initial: u32, damage_per_wrong: u32) -> Self {
        Self {
            current: initial,
            initial,
            damage_per_wrong,
        }
    }

    /// Apply one judged answer; returns the health left
    pub fn apply_answer_result(&mut self, is_correct: bool) -> u32 {
        if !is_correct {
            self.current = self.current.saturating_sub(self.damage_per_wrong);
            tracing::debug!(health = self.current, "remote player lost health");
        }
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl Default for RemoteHealth {
    fn default() -> Self {
        Self::new(3)
    }
}
