use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Time between two drains of the buffer, in milliseconds
    pub dispatch_interval_ms: u64,

    /// Initial capacity of the receive buffer
    pub buffer_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            dispatch_interval_ms: 100,
            buffer_capacity: 64,
        }
    }
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dispatch_interval(mut self, ms: u64) -> Self {
        self.dispatch_interval_ms = ms;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Interval as a `Duration`, never zero
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_millis(self.dispatch_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.dispatch_interval_ms, 100);
        assert_eq!(config.dispatch_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = DispatcherConfig::new().with_dispatch_interval(0);
        assert_eq!(config.dispatch_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DispatcherConfig =
            serde_json::from_str(r#"{"dispatch_interval_ms": 16}"#).unwrap();
        assert_eq!(config.dispatch_interval_ms, 16);
        assert_eq!(config.buffer_capacity, 64);
    }
}
