use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_PACKET_SIZE: usize = 16384;

pub const HAND_LIMIT: usize = 5;
pub const STARTING_MANA: u32 = 6;
pub const STARTING_HEALTH: i32 = 20;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum Packet {
    Connect {
        client_version: u32,
    },
    Join {
        player_id: String,
    },
    RequestState,
    MoveCard {
        player_id: String,
        card_id: CardId,
        source: ZoneKind,
        destination: ZoneKind,
    },
    Attack {
        player_id: String,
        attacker_card_id: CardId,
        defender_card_id: CardId,
    },
    EndTurn,
    ResetGame,
    Heartbeat,
    Disconnect,

    Connected {
        client_id: u32,
    },
    GameUpdate {
        state: GameState,
    },
    Error {
        message: String,
    },
    Disconnected {
        reason: String,
    },
}

/// Session-unique identity of a card instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches('#').parse().map(CardId)
    }
}

/// The two seats of a game, addressed on the wire as "player1" and "player2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerId::Player1 => "player1",
            PlayerId::Player2 => "player2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPlayerId(pub String);

impl fmt::Display for InvalidPlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid player ID: {}", self.0)
    }
}

impl std::error::Error for InvalidPlayerId {}

impl FromStr for PlayerId {
    type Err = InvalidPlayerId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player1" => Ok(PlayerId::Player1),
            "player2" => Ok(PlayerId::Player2),
            other => Err(InvalidPlayerId(other.to_string())),
        }
    }
}

/// Zones a move request may name. The deck is never a move endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Hand,
    Board,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Hand => f.write_str("hand"),
            ZoneKind::Board => f.write_str("board"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardId,
    pub name: String,
    pub mana_cost: u32,
    pub attack: u32,
    pub health: i32,
    pub base_health: i32,
    pub image: String,
    pub ready_to_attack: bool,
}

impl CardInstance {
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Applies `amount` damage, saturating instead of wrapping.
    pub fn take_damage(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: Vec<CardInstance>,
    pub board: Vec<CardInstance>,
    pub deck: Vec<CardInstance>,
    pub health: i32,
    pub mana_amount: u32,
    pub initialized: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            hand: Vec::new(),
            board: Vec::new(),
            deck: Vec::new(),
            health: STARTING_HEALTH,
            mana_amount: STARTING_MANA,
            initialized: false,
        }
    }

    pub fn hand_position(&self, card_id: CardId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == card_id)
    }

    pub fn board_position(&self, card_id: CardId) -> Option<usize> {
        self.board.iter().position(|card| card.id == card_id)
    }

    /// Drops every dead card from the board, returning how many were removed.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.board.len();
        self.board.retain(|card| !card.is_dead());
        before - self.board.len()
    }

    /// Iterates over every card the player owns, in deck, hand, board order.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck.iter().chain(self.hand.iter()).chain(self.board.iter())
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Players {
    pub player1: PlayerState,
    pub player2: PlayerState,
}

impl Players {
    pub fn get(&self, id: PlayerId) -> &PlayerState {
        match id {
            PlayerId::Player1 => &self.player1,
            PlayerId::Player2 => &self.player2,
        }
    }

    pub fn get_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        match id {
            PlayerId::Player1 => &mut self.player1,
            PlayerId::Player2 => &mut self.player2,
        }
    }

    /// Borrows `id`'s state and the opponent's state at the same time.
    pub fn pair_mut(&mut self, id: PlayerId) -> (&mut PlayerState, &mut PlayerState) {
        match id {
            PlayerId::Player1 => (&mut self.player1, &mut self.player2),
            PlayerId::Player2 => (&mut self.player2, &mut self.player1),
        }
    }
}

/// Canonical state of one game, broadcast to clients as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Players,
    pub turn: PlayerId,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            players: Players::default(),
            turn: PlayerId::Player1,
        }
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        self.players.get_mut(id)
    }

    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.players.player1.cards().chain(self.players.player2.cards())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
