//! Validation and application of player actions
//!
//! Every action checks turn ownership first and then its own
//! preconditions. A failed check leaves the state exactly as it was and
//! reports a `Rejection`; clients are never told about rejections and
//! simply receive the unchanged snapshot.

use crate::game::GameSession;
use log::{debug, info};
use shared::{CardId, PlayerId, ZoneKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotYourTurn,
    CardNotInHand,
    CardNotOnBoard,
    InsufficientMana { cost: u32, available: u32 },
    NotReady,
    DefenderNotFound,
    UnsupportedMove { source: ZoneKind, destination: ZoneKind },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotYourTurn => f.write_str("not this player's turn"),
            Rejection::CardNotInHand => f.write_str("card is not in hand"),
            Rejection::CardNotOnBoard => f.write_str("card is not on the board"),
            Rejection::InsufficientMana { cost, available } => {
                write!(f, "card costs {} mana but only {} available", cost, available)
            }
            Rejection::NotReady => f.write_str("card is not ready to attack"),
            Rejection::DefenderNotFound => f.write_str("defender is not on the enemy board"),
            Rejection::UnsupportedMove {
                source,
                destination,
            } => write!(f, "cannot move a card from {} to {}", source, destination),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Rejected(Rejection),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

impl From<Result<(), Rejection>> for ActionOutcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => ActionOutcome::Applied,
            Err(rejection) => ActionOutcome::Rejected(rejection),
        }
    }
}

impl GameSession {
    /// Moves a card between hand and board on behalf of `player`
    pub fn move_card(
        &mut self,
        player: PlayerId,
        card_id: CardId,
        source: ZoneKind,
        destination: ZoneKind,
    ) -> ActionOutcome {
        let result = self.check_turn(player).and_then(|_| match (source, destination) {
            (ZoneKind::Hand, ZoneKind::Board) => self.try_deploy(player, card_id),
            (ZoneKind::Board, ZoneKind::Hand) => self.try_recall(player, card_id),
            _ => Err(Rejection::UnsupportedMove {
                source,
                destination,
            }),
        });
        self.finish("move", player, result)
    }

    /// Plays a card from hand onto the board, paying its mana cost
    pub fn deploy(&mut self, player: PlayerId, card_id: CardId) -> ActionOutcome {
        let result = self
            .check_turn(player)
            .and_then(|_| self.try_deploy(player, card_id));
        self.finish("deploy", player, result)
    }

    /// Returns an attack-ready card from the board to hand. Mana is not refunded.
    pub fn recall(&mut self, player: PlayerId, card_id: CardId) -> ActionOutcome {
        let result = self
            .check_turn(player)
            .and_then(|_| self.try_recall(player, card_id));
        self.finish("recall", player, result)
    }

    /// Has one of `player`'s ready cards strike an enemy card, then clears
    /// the dead from both boards.
    pub fn attack(
        &mut self,
        player: PlayerId,
        attacker_id: CardId,
        defender_id: CardId,
    ) -> ActionOutcome {
        let result = self
            .check_turn(player)
            .and_then(|_| self.try_attack(player, attacker_id, defender_id));
        self.finish("attack", player, result)
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), Rejection> {
        if self.state.turn == player {
            Ok(())
        } else {
            Err(Rejection::NotYourTurn)
        }
    }

    fn try_deploy(&mut self, player: PlayerId, card_id: CardId) -> Result<(), Rejection> {
        let state = self.state.player_mut(player);
        let index = state.hand_position(card_id).ok_or(Rejection::CardNotInHand)?;

        let cost = state.hand[index].mana_cost;
        let remaining = state
            .mana_amount
            .checked_sub(cost)
            .ok_or(Rejection::InsufficientMana {
                cost,
                available: state.mana_amount,
            })?;

        let card = state.hand.remove(index);
        state.mana_amount = remaining;
        state.board.push(card);
        Ok(())
    }

    fn try_recall(&mut self, player: PlayerId, card_id: CardId) -> Result<(), Rejection> {
        let state = self.state.player_mut(player);
        let index = state
            .board_position(card_id)
            .ok_or(Rejection::CardNotOnBoard)?;

        if !state.board[index].ready_to_attack {
            return Err(Rejection::NotReady);
        }

        let mut card = state.board.remove(index);
        card.ready_to_attack = false;
        state.hand.push(card);
        Ok(())
    }

    fn try_attack(
        &mut self,
        player: PlayerId,
        attacker_id: CardId,
        defender_id: CardId,
    ) -> Result<(), Rejection> {
        let (own, enemy) = self.state.players.pair_mut(player);

        let attacker = own
            .board
            .iter_mut()
            .find(|card| card.id == attacker_id)
            .ok_or(Rejection::CardNotOnBoard)?;
        if !attacker.ready_to_attack {
            return Err(Rejection::NotReady);
        }
        let defender = enemy
            .board
            .iter_mut()
            .find(|card| card.id == defender_id)
            .ok_or(Rejection::DefenderNotFound)?;

        defender.take_damage(attacker.attack);
        attacker.ready_to_attack = false;

        let destroyed = own.remove_dead() + enemy.remove_dead();
        if destroyed > 0 {
            info!("{} destroyed {} card(s) with card {}", player, destroyed, attacker_id);
        }
        Ok(())
    }

    fn finish(
        &self,
        action: &str,
        player: PlayerId,
        result: Result<(), Rejection>,
    ) -> ActionOutcome {
        if let Err(rejection) = &result {
            debug!("Rejected {} from {}: {}", action, player, rejection);
        }
        result.into()
    }
}
