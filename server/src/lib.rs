//! # Card Battle Server Library
//!
//! This library provides the authoritative server for a two-player card
//! battle. It holds the canonical game state, validates every player
//! action against it, and broadcasts the resulting state to all connected
//! clients.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Rules
//! Mana accounting, attack readiness, deck/hand/board transitions and
//! turn ownership are all enforced here. Clients only ever submit
//! requests; whether a request took effect is visible solely through the
//! next state snapshot.
//!
//! ### Client Management
//! Handles the lifecycle of client connections:
//! - Connection handshake with protocol version check
//! - Seat tracking for clients that joined as a player
//! - Timeout detection and cleanup
//!
//! ### State Broadcasting
//! After every attempted action the full `GameState` is pushed to all
//! connected clients, so every observer converges on the same view.
//!
//! ## Architecture Design
//!
//! ### Single Owner, One Packet at a Time
//! The `GameSession` is owned by the server's main loop. Network tasks
//! only forward packets over a channel, and the loop applies them one at
//! a time, so an action can never observe another one half-applied.
//!
//! ### UDP-Based Communication
//! Packets are `bincode`-encoded `shared::Packet` values, one per
//! datagram. Every reply is a full snapshot, so a lost datagram is made
//! good by the next one or by an explicit `RequestState`.
//!
//! ## Module Organization
//!
//! ### Catalog (`catalog`)
//! Read-only card name → base stats lookup, loaded from JSON.
//!
//! ### Factory (`factory`) and Deck (`deck`)
//! Card instances with session-unique ids, deck construction and random
//! hand filling.
//!
//! ### Game (`game`) and Actions (`actions`)
//! The `GameSession`: joining, turn advancement and reset, plus deploy,
//! recall, move and attack with their validation rules.
//!
//! ### Client Manager (`client_manager`) and Network (`network`)
//! Connection bookkeeping, the UDP receive/send tasks and the loop that
//! drives the session.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::catalog::Catalog;
//! use server::deck::starting_decklist;
//! use server::game::GameSession;
//! use server::network::Server;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = GameSession::new(Catalog::builtin()?, starting_decklist());
//!
//!     // Up to 8 connected clients, dropped after 30s of silence
//!     let mut server =
//!         Server::new("127.0.0.1:6969", session, 8, Duration::from_secs(30)).await?;
//!
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod catalog;
pub mod client_manager;
pub mod deck;
pub mod factory;
pub mod game;
pub mod network;
