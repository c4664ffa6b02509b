//! # Card Battle Console Client
//!
//! A terminal client for the card battle server. It reads commands from
//! standard input, turns them into protocol packets, and prints every
//! state snapshot the server sends back.
//!
//! The client keeps no game rules of its own. Whether a deploy or an
//! attack went through is only visible in the next snapshot, exactly as
//! the server intends.
//!
//! ## Module Organization
//!
//! ### Commands Module (`commands`)
//! Parses lines such as `deploy 3` or `attack 3 14` into commands and
//! converts them into packets for the seat the client has joined.
//!
//! ### Rendering Module (`rendering`)
//! Formats a `GameState` as text, from a player's perspective or as a
//! neutral observer.
//!
//! ### Network Module (`network`)
//! UDP connection to the server: handshake, heartbeats, and the loop that
//! multiplexes server packets with console input.
//!
//! ## Usage Example
//!
//! ```rust
//! use client::commands::{parse_command, Command};
//! use shared::{Packet, PlayerId};
//!
//! let command = parse_command("deploy 7").unwrap();
//! match command.into_packet(Some(PlayerId::Player1)) {
//!     Some(Packet::MoveCard { player_id, .. }) => assert_eq!(player_id, "player1"),
//!     _ => unreachable!(),
//! }
//!
//! // Seat-bound commands need a joined seat
//! assert!(parse_command("end").unwrap().into_packet(None).is_some());
//! assert!(parse_command("deploy 7").unwrap().into_packet(None).is_none());
//! ```

pub mod commands;
pub mod network;
pub mod rendering;
