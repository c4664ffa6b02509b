//! Turns catalog entries into stateful card instances with session-unique ids

use crate::catalog::CardStats;
use shared::{CardId, CardInstance};

/// Issues card instances from a monotonic counter.
///
/// One factory lives for the whole session and is never rewound, so ids
/// stay unique across resets.
#[derive(Debug)]
pub struct CardFactory {
    next_id: u64,
}

impl CardFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn instantiate(&mut self, stats: &CardStats) -> CardInstance {
        let id = CardId(self.next_id);
        self.next_id += 1;

        CardInstance {
            id,
            name: stats.name.clone(),
            mana_cost: stats.mana_cost,
            attack: stats.attack,
            health: stats.health,
            base_health: stats.health,
            image: stats.image.clone(),
            ready_to_attack: false,
        }
    }

    /// Number of instances created so far
    pub fn issued(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for CardFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CardStats {
        CardStats {
            name: "Mopp".to_string(),
            mana_cost: 1,
            attack: 1,
            health: 2,
            image: "mopp.png".to_string(),
        }
    }

    #[test]
    fn test_instantiate_copies_stats() {
        let mut factory = CardFactory::new();
        let card = factory.instantiate(&stats());

        assert_eq!(card.name, "Mopp");
        assert_eq!(card.mana_cost, 1);
        assert_eq!(card.attack, 1);
        assert_eq!(card.health, 2);
        assert_eq!(card.base_health, 2);
        assert_eq!(card.image, "mopp.png");
        assert!(!card.ready_to_attack);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut factory = CardFactory::new();
        let ids: Vec<CardId> = (0..100).map(|_| factory.instantiate(&stats()).id).collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(factory.issued(), 100);
    }
}
