//! Authoritative game session: seats, turn order and session lifecycle
//!
//! A `GameSession` owns everything one game needs: the canonical
//! `GameState`, the card catalog and decklist, the card factory and the
//! random source used for draws. The network loop holds the session and
//! calls into it one packet at a time, so no locking is needed here.
//!
//! Player actions that move cards or resolve combat live in `actions`.

use crate::catalog::Catalog;
use crate::deck::{build_deck, fill_hand};
use crate::factory::CardFactory;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{GameState, InvalidPlayerId, Packet, PlayerId, MAX_PACKET_SIZE, STARTING_MANA};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidPlayer(String),
    SnapshotTooLarge { bytes: u64, limit: usize },
    Encoding(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlayer(id) => write!(f, "Invalid player ID: {}", id),
            GameError::SnapshotTooLarge { bytes, limit } => write!(
                f,
                "A dealt game encodes to {} bytes, over the {} byte datagram limit",
                bytes, limit
            ),
            GameError::Encoding(reason) => write!(f, "Failed to encode snapshot: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}

impl From<InvalidPlayerId> for GameError {
    fn from(e: InvalidPlayerId) -> Self {
        GameError::InvalidPlayer(e.0)
    }
}

pub struct GameSession {
    pub(crate) state: GameState,
    catalog: Catalog,
    decklist: Vec<String>,
    factory: CardFactory,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session with uninitialized seats, drawing from OS entropy
    pub fn new(catalog: Catalog, decklist: Vec<String>) -> Self {
        Self::with_rng(catalog, decklist, StdRng::from_entropy())
    }

    /// Creates a session whose draws are reproducible from `seed`
    pub fn with_seed(catalog: Catalog, decklist: Vec<String>, seed: u64) -> Self {
        Self::with_rng(catalog, decklist, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, decklist: Vec<String>, rng: StdRng) -> Self {
        Self {
            state: GameState::new(),
            catalog,
            decklist,
            factory: CardFactory::new(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the canonical state, for setting up scenarios
    #[cfg(any(test, feature = "test-support"))]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn turn(&self) -> PlayerId {
        self.state.turn
    }

    /// Seats a player. The first join for a seat builds its deck and draws
    /// the opening hand; later joins leave the state untouched.
    pub fn join(&mut self, player_id: &str) -> Result<PlayerId, GameError> {
        let player = player_id.parse::<PlayerId>()?;

        if !self.state.player(player).initialized {
            self.deal(player);
            info!(
                "Dealt {} an opening hand of {} cards",
                player,
                self.state.player(player).hand.len()
            );
        } else {
            info!("{} rejoined", player);
        }

        Ok(player)
    }

    /// Passes the turn to the other player, refilling their hand and mana
    /// and readying their board. Returns the new turn owner.
    pub fn end_turn(&mut self) -> PlayerId {
        let next = self.state.turn.other();
        let player = self.state.player_mut(next);

        fill_hand(player, &mut self.rng);
        player.mana_amount = STARTING_MANA;
        for card in &mut player.board {
            card.ready_to_attack = true;
        }

        self.state.turn = next;
        info!("Turn passed to {}", next);
        next
    }

    /// Starts the game over: fresh state, rebuilt decks and opening hands
    /// for both seats. The card id counter keeps counting.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        for player in PlayerId::ALL {
            self.deal(player);
        }
        info!("Game reset, {} cards issued so far", self.factory.issued());
    }

    /// Checks that a `GameUpdate` for this catalog and decklist fits in one
    /// datagram once both seats are dealt, returning its encoded size.
    ///
    /// Cards only move between zones or die after dealing, so no later
    /// snapshot encodes larger than this one.
    pub fn check_snapshot_size(&self) -> Result<u64, GameError> {
        let mut factory = CardFactory::new();
        let mut state = GameState::new();
        for player in PlayerId::ALL {
            let player = state.player_mut(player);
            player.initialized = true;
            player.deck = self
                .decklist
                .iter()
                .filter_map(|name| self.catalog.find(name))
                .map(|stats| factory.instantiate(stats))
                .collect();
        }

        let packet = Packet::GameUpdate { state };
        let bytes = bincode::serialized_size(&packet)
            .map_err(|e| GameError::Encoding(e.to_string()))?;
        if bytes > MAX_PACKET_SIZE as u64 {
            return Err(GameError::SnapshotTooLarge {
                bytes,
                limit: MAX_PACKET_SIZE,
            });
        }
        Ok(bytes)
    }

    fn deal(&mut self, player_id: PlayerId) {
        let player = self.state.player_mut(player_id);
        build_deck(player, &self.decklist, &self.catalog, &mut self.factory);
        fill_hand(player, &mut self.rng);
        player.initialized = true;
    }
}
