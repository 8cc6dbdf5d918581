use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one transport instance inside a peer registry
///
/// Distinct from the game-level `PlayerId`: two transports may carry
/// messages for the same player name, but never share a `PeerId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(Uuid);

impl PeerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for PeerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PeerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_id_display() {
        let uuid = Uuid::new_v4();
        let peer_id = PeerId::from(uuid);
        assert_eq!(peer_id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_peer_ids_are_unique() {
        assert_ne!(PeerId::new(), PeerId::new());
    }
}
