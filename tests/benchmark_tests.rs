//! Performance benchmarks for critical game systems

use bincode::{deserialize, serialize};
use server::catalog::Catalog;
use server::deck::starting_decklist;
use server::game::GameSession;
use shared::{CardId, GameState, Packet, PlayerId, STARTING_MANA};
use std::time::Instant;

fn session() -> GameSession {
    GameSession::with_seed(Catalog::builtin().unwrap(), starting_decklist(), 1234)
}

/// Benchmarks a full re-deal of both seats
#[test]
fn benchmark_reset() {
    let mut session = session();

    let iterations = 10_000;
    let start = Instant::now();

    for _ in 0..iterations {
        session.reset();
    }

    let duration = start.elapsed();
    println!(
        "Game reset: {} iterations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Should complete in under 2 seconds
    assert!(duration.as_millis() < 2000);
}

/// Benchmarks turn passing, which refills hand and mana each time
#[test]
fn benchmark_end_turn() {
    let mut session = session();
    session.reset();

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        session.end_turn();
    }

    let duration = start.elapsed();
    println!(
        "End turn: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 1000);
}

/// Benchmarks deploy and recall cycling a single card
#[test]
fn benchmark_deploy_recall_cycle() {
    let mut session = session();
    session.reset();
    let card: CardId = session.state().players.player1.hand[0].id;

    let iterations = 50_000;
    let start = Instant::now();

    for _ in 0..iterations {
        session.state_mut().players.player1.mana_amount = STARTING_MANA;
        assert!(session.deploy(PlayerId::Player1, card).is_applied());
        session.state_mut().players.player1.board[0].ready_to_attack = true;
        assert!(session.recall(PlayerId::Player1, card).is_applied());
    }

    let duration = start.elapsed();
    println!(
        "Deploy/recall: {} cycles in {:?} ({:.2} ns/cycle)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 1000);
}

/// Benchmarks attack resolution against a crowded enemy board
#[test]
fn benchmark_attack_resolution() {
    let mut session = session();
    session.reset();

    // Pile every card in the game onto the two boards
    let state = session.state_mut();
    for player in PlayerId::ALL {
        let seat = state.player_mut(player);
        let mut cards: Vec<_> = seat.hand.drain(..).chain(seat.deck.drain(..)).collect();
        for card in &mut cards {
            card.ready_to_attack = true;
            card.health = 1_000_000;
        }
        seat.board = cards;
    }
    let attacker = state.players.player1.board[0].id;
    let defender = state.players.player2.board.last().map(|c| c.id).unwrap();

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        session.state_mut().players.player1.board[0].ready_to_attack = true;
        session.attack(PlayerId::Player1, attacker, defender);
    }

    let duration = start.elapsed();
    println!(
        "Attack resolution: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 2000);
}

/// Benchmarks encoding and decoding of the snapshot every client receives
#[test]
fn benchmark_snapshot_serialization() {
    let mut session = session();
    session.reset();
    let packet = Packet::GameUpdate {
        state: session.state().clone(),
    };

    let iterations = 10_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let data = serialize(&packet).unwrap();
        let decoded: Packet = deserialize(&data).unwrap();
        assert!(matches!(decoded, Packet::GameUpdate { .. }));
    }

    let duration = start.elapsed();
    println!(
        "Snapshot encode/decode: {} iterations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 3000);
}

/// Benchmarks cloning the full state, done once per broadcast
#[test]
fn benchmark_state_clone() {
    let mut session = session();
    session.reset();

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let snapshot: GameState = session.state().clone();
        assert_eq!(snapshot.turn, PlayerId::Player1);
    }

    let duration = start.elapsed();
    println!(
        "State clone: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 2000);
}
