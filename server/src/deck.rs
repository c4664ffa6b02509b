//! Deck construction and hand filling

use crate::catalog::Catalog;
use crate::factory::CardFactory;
use log::warn;
use rand::Rng;
use shared::{PlayerState, HAND_LIMIT};

/// Decklist every player starts with unless the server is configured otherwise
pub const STARTING_DECK: [&str; 10] = [
    "Vacume", "Vacume", "Mopp", "Mopp", "Mopp", "Pan", "Pan", "Hardhat", "Hardhat", "Hardhat",
];

pub fn starting_decklist() -> Vec<String> {
    STARTING_DECK.iter().map(|name| name.to_string()).collect()
}

/// Replaces the player's deck with fresh instances of every decklist entry.
///
/// Names the catalog does not know are skipped. Returns the size of the new deck.
pub fn build_deck(
    player: &mut PlayerState,
    decklist: &[String],
    catalog: &Catalog,
    factory: &mut CardFactory,
) -> usize {
    player.deck = decklist
        .iter()
        .filter_map(|name| match catalog.find(name) {
            Some(stats) => Some(factory.instantiate(stats)),
            None => {
                warn!("Skipping unknown card '{}' in decklist", name);
                None
            }
        })
        .collect();

    player.deck.len()
}

/// Draws uniformly random cards from the deck until the hand holds
/// `HAND_LIMIT` cards or the deck runs out. Returns the number drawn.
pub fn fill_hand<R: Rng + ?Sized>(player: &mut PlayerState, rng: &mut R) -> usize {
    let mut drawn = 0;

    while player.hand.len() < HAND_LIMIT && !player.deck.is_empty() {
        let index = rng.gen_range(0..player.deck.len());
        let mut card = player.deck.swap_remove(index);
        card.ready_to_attack = false;
        player.hand.push(card);
        drawn += 1;
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_build_starting_deck() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();

        let size = build_deck(&mut player, &starting_decklist(), &catalog(), &mut factory);

        assert_eq!(size, STARTING_DECK.len());
        assert_eq!(player.deck.len(), STARTING_DECK.len());
        assert_eq!(
            player.deck.iter().filter(|c| c.name == "Mopp").count(),
            3
        );

        let ids: HashSet<_> = player.deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), player.deck.len());
    }

    #[test]
    fn test_build_deck_replaces_previous_deck() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let decklist = starting_decklist();

        build_deck(&mut player, &decklist, &catalog(), &mut factory);
        let first_ids: HashSet<_> = player.deck.iter().map(|c| c.id).collect();

        build_deck(&mut player, &decklist, &catalog(), &mut factory);
        assert_eq!(player.deck.len(), decklist.len());
        assert!(player.deck.iter().all(|c| !first_ids.contains(&c.id)));
    }

    #[test]
    fn test_build_deck_skips_unknown_names() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let decklist = vec!["Mopp".to_string(), "Broom".to_string(), "Pan".to_string()];

        let size = build_deck(&mut player, &decklist, &catalog(), &mut factory);

        assert_eq!(size, 2);
        assert!(player.deck.iter().all(|c| c.name != "Broom"));
    }

    #[test]
    fn test_fill_hand_stops_at_limit() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let mut rng = StdRng::seed_from_u64(7);
        build_deck(&mut player, &starting_decklist(), &catalog(), &mut factory);

        let drawn = fill_hand(&mut player, &mut rng);

        assert_eq!(drawn, HAND_LIMIT);
        assert_eq!(player.hand.len(), HAND_LIMIT);
        assert_eq!(player.deck.len(), STARTING_DECK.len() - HAND_LIMIT);
        assert!(player.hand.iter().all(|c| !c.ready_to_attack));
    }

    #[test]
    fn test_fill_hand_tops_up_partial_hand() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let mut rng = StdRng::seed_from_u64(11);
        build_deck(&mut player, &starting_decklist(), &catalog(), &mut factory);
        fill_hand(&mut player, &mut rng);

        player.hand.truncate(2);
        let deck_before = player.deck.len();
        let drawn = fill_hand(&mut player, &mut rng);

        assert_eq!(drawn, 3);
        assert_eq!(player.hand.len(), HAND_LIMIT);
        assert_eq!(player.deck.len(), deck_before - 3);
    }

    #[test]
    fn test_fill_hand_with_short_deck() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let mut rng = StdRng::seed_from_u64(3);
        let decklist = vec!["Mopp".to_string(), "Pan".to_string()];
        build_deck(&mut player, &decklist, &catalog(), &mut factory);

        assert_eq!(fill_hand(&mut player, &mut rng), 2);
        assert_eq!(player.hand.len(), 2);
        assert!(player.deck.is_empty());

        assert_eq!(fill_hand(&mut player, &mut rng), 0);
    }

    #[test]
    fn test_fill_hand_clears_readiness() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let mut rng = StdRng::seed_from_u64(5);
        build_deck(&mut player, &starting_decklist(), &catalog(), &mut factory);
        for card in &mut player.deck {
            card.ready_to_attack = true;
        }

        fill_hand(&mut player, &mut rng);
        assert!(player.hand.iter().all(|c| !c.ready_to_attack));
    }

    #[test]
    fn test_fill_hand_preserves_card_set() {
        let mut player = PlayerState::new();
        let mut factory = CardFactory::new();
        let mut rng = StdRng::seed_from_u64(99);
        build_deck(&mut player, &starting_decklist(), &catalog(), &mut factory);
        let before: HashSet<_> = player.deck.iter().map(|c| c.id).collect();

        fill_hand(&mut player, &mut rng);
        let after: HashSet<_> = player.cards().map(|c| c.id).collect();

        assert_eq!(before, after);
    }
}
