//! Connection bookkeeping for the game server
//!
//! This module tracks which network addresses are connected, including:
//! - Client connection lifecycle (connect, disconnect, timeout)
//! - Which seat, if any, a client has joined
//! - Capacity limits and address lookup for broadcasting
//!
//! None of this affects the game state: a client that times out or
//! disconnects leaves its seat, hand and board exactly as they were.

use log::info;
use shared::PlayerId;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// A connected client
#[derive(Debug)]
pub struct Client {
    /// Unique client identifier assigned by the server
    pub id: u32,
    /// Network address for sending responses
    pub addr: SocketAddr,
    /// Last time we received any packet from this client
    pub last_seen: Instant,
    /// Seat the client last joined successfully
    pub seat: Option<PlayerId>,
}

impl Client {
    pub fn new(id: u32, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            last_seen: Instant::now(),
            seat: None,
        }
    }

    pub fn refresh_last_seen(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Returns true if nothing has arrived from this client within `timeout`
    pub fn is_timed_out(&self, timeout: Duration) -> bool {
        self.last_seen.elapsed() > timeout
    }
}

/// Roster of connected clients.
///
/// Shared between the main loop, the outbound sender and the timeout
/// checker, which is why it lives behind a lock in `network::Server`
/// while the game session does not.
pub struct ClientManager {
    /// Connected clients indexed by their unique ID
    clients: HashMap<u32, Client>,
    /// Next available client ID for new connections
    next_client_id: u32,
    /// Maximum number of concurrent clients allowed
    max_clients: usize,
    /// Silence after which a client is dropped
    timeout: Duration,
}

impl ClientManager {
    pub fn new(max_clients: usize, timeout: Duration) -> Self {
        Self {
            clients: HashMap::new(),
            next_client_id: 1,
            max_clients,
            timeout,
        }
    }

    /// Attempts to add a new client connection
    ///
    /// Returns Some(client_id) if successful, None if server is at capacity.
    pub fn add_client(&mut self, addr: SocketAddr) -> Option<u32> {
        if self.clients.len() >= self.max_clients {
            return None;
        }

        let client_id = self.next_client_id;
        self.next_client_id += 1;

        info!("Client {} connected from {}", client_id, addr);
        self.clients.insert(client_id, Client::new(client_id, addr));

        Some(client_id)
    }

    /// Removes a client, returning true if it was still connected
    pub fn remove_client(&mut self, client_id: &u32) -> bool {
        if let Some(client) = self.clients.remove(client_id) {
            match client.seat {
                Some(seat) => info!("Client {} ({}) disconnected", client.id, seat),
                None => info!("Client {} disconnected", client.id),
            }
            true
        } else {
            false
        }
    }

    pub fn find_client_by_addr(&self, addr: SocketAddr) -> Option<u32> {
        self.clients
            .iter()
            .find(|(_, client)| client.addr == addr)
            .map(|(id, _)| *id)
    }

    /// Marks the client at `addr` as alive and returns its ID
    pub fn touch(&mut self, addr: SocketAddr) -> Option<u32> {
        self.clients
            .values_mut()
            .find(|client| client.addr == addr)
            .map(|client| {
                client.refresh_last_seen();
                client.id
            })
    }

    pub fn assign_seat(&mut self, client_id: u32, seat: PlayerId) {
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.seat = Some(seat);
        }
    }

    pub fn seat_of(&self, client_id: u32) -> Option<PlayerId> {
        self.clients.get(&client_id).and_then(|client| client.seat)
    }

    /// Removes every client that has been silent for longer than the
    /// configured timeout and returns their IDs.
    pub fn check_timeouts(&mut self) -> Vec<u32> {
        let timed_out: Vec<u32> = self
            .clients
            .iter()
            .filter(|(_, client)| client.is_timed_out(self.timeout))
            .map(|(id, _)| *id)
            .collect();

        for client_id in &timed_out {
            self.remove_client(client_id);
        }

        timed_out
    }

    /// Gets all client IDs and their network addresses for broadcasting
    pub fn get_client_addrs(&self) -> Vec<(u32, SocketAddr)> {
        self.clients
            .iter()
            .map(|(id, client)| (*id, client.addr))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_addr() -> SocketAddr {
        "127.0.0.1:6969".parse().unwrap()
    }

    fn test_addr2() -> SocketAddr {
        "127.0.0.1:6970".parse().unwrap()
    }

    fn manager(max_clients: usize) -> ClientManager {
        ClientManager::new(max_clients, Duration::from_secs(30))
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new(1, test_addr());

        assert_eq!(client.id, 1);
        assert_eq!(client.addr, test_addr());
        assert_eq!(client.seat, None);
    }

    #[test]
    fn test_client_timeout() {
        let mut client = Client::new(1, test_addr());
        assert!(!client.is_timed_out(Duration::from_secs(1)));

        client.last_seen = Instant::now() - Duration::from_secs(2);
        assert!(client.is_timed_out(Duration::from_secs(1)));

        client.refresh_last_seen();
        assert!(!client.is_timed_out(Duration::from_secs(1)));
    }

    #[test]
    fn test_add_multiple_clients() {
        let mut manager = manager(3);

        assert_eq!(manager.add_client(test_addr()), Some(1));
        assert_eq!(manager.add_client(test_addr2()), Some(2));
        assert_eq!(manager.len(), 2);
        assert!(!manager.is_empty());
    }

    #[test]
    fn test_add_client_max_capacity() {
        let mut manager = manager(1);

        assert!(manager.add_client(test_addr()).is_some());
        assert!(manager.add_client(test_addr2()).is_none());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_remove_client() {
        let mut manager = manager(2);
        let client_id = manager.add_client(test_addr()).unwrap();

        assert!(manager.remove_client(&client_id));
        assert!(manager.is_empty());
        assert!(!manager.remove_client(&client_id));
    }

    #[test]
    fn test_find_and_touch_by_addr() {
        let mut manager = manager(2);
        let client_id = manager.add_client(test_addr()).unwrap();

        assert_eq!(manager.find_client_by_addr(test_addr()), Some(client_id));
        assert_eq!(manager.find_client_by_addr(test_addr2()), None);
        assert_eq!(manager.touch(test_addr()), Some(client_id));
        assert_eq!(manager.touch(test_addr2()), None);
    }

    #[test]
    fn test_seat_assignment() {
        let mut manager = manager(2);
        let client_id = manager.add_client(test_addr()).unwrap();

        assert_eq!(manager.seat_of(client_id), None);
        manager.assign_seat(client_id, PlayerId::Player2);
        assert_eq!(manager.seat_of(client_id), Some(PlayerId::Player2));
        assert_eq!(manager.seat_of(999), None);
    }

    #[test]
    fn test_check_timeouts_removes_silent_clients() {
        let mut manager = ClientManager::new(4, Duration::from_secs(5));
        let quiet = manager.add_client(test_addr()).unwrap();
        let active = manager.add_client(test_addr2()).unwrap();

        if let Some(client) = manager.clients.get_mut(&quiet) {
            client.last_seen = Instant::now() - Duration::from_secs(10);
        }

        let removed = manager.check_timeouts();

        assert_eq!(removed, vec![quiet]);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.find_client_by_addr(test_addr2()), Some(active));
    }
}
