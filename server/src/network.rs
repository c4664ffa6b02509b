//! Server network layer: UDP transport and the action-processing loop

use crate::client_manager::ClientManager;
use crate::game::GameSession;
use bincode::{deserialize, serialize};
use log::{debug, error, info, warn};
use shared::{Packet, PlayerId, MAX_PACKET_SIZE, PROTOCOL_VERSION};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, RwLock};

/// Messages sent from network tasks to main server loop
#[derive(Debug)]
pub enum ServerMessage {
    PacketReceived { packet: Packet, addr: SocketAddr },
    ClientTimeout { client_id: u32 },
}

/// Messages sent from main server loop to the outbound sender task
#[derive(Debug)]
pub enum GameMessage {
    SendPacket { packet: Packet, addr: SocketAddr },
    BroadcastPacket { packet: Packet },
}

/// Main server coordinating networking and the game session
pub struct Server {
    socket: Arc<UdpSocket>,
    clients: Arc<RwLock<ClientManager>>,
    session: GameSession,

    // Communication channels
    server_tx: mpsc::UnboundedSender<ServerMessage>,
    server_rx: mpsc::UnboundedReceiver<ServerMessage>,
    game_tx: mpsc::UnboundedSender<GameMessage>,
    game_rx: mpsc::UnboundedReceiver<GameMessage>,
}

impl Server {
    pub async fn new(
        addr: &str,
        session: GameSession,
        max_clients: usize,
        client_timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let snapshot_bytes = session.check_snapshot_size()?;
        debug!("Dealt snapshots encode to {} bytes", snapshot_bytes);

        let socket = Arc::new(UdpSocket::bind(addr).await?);
        info!("Server listening on {}", socket.local_addr()?);

        let (server_tx, server_rx) = mpsc::unbounded_channel();
        let (game_tx, game_rx) = mpsc::unbounded_channel();

        Ok(Server {
            socket,
            clients: Arc::new(RwLock::new(ClientManager::new(max_clients, client_timeout))),
            session,
            server_tx,
            server_rx,
            game_tx,
            game_rx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Spawns task that continuously listens for incoming packets
    fn spawn_network_receiver(&self) {
        let socket = Arc::clone(&self.socket);
        let server_tx = self.server_tx.clone();

        tokio::spawn(async move {
            let mut buffer = vec![0u8; MAX_PACKET_SIZE];

            loop {
                match socket.recv_from(&mut buffer).await {
                    Ok((len, addr)) => {
                        if let Ok(packet) = deserialize::<Packet>(&buffer[0..len]) {
                            if let Err(e) =
                                server_tx.send(ServerMessage::PacketReceived { packet, addr })
                            {
                                error!("Failed to send packet to main loop: {}", e);
                                break;
                            }
                        } else {
                            warn!("Failed to deserialize packet from {}", addr);
                        }
                    }
                    Err(e) => {
                        error!("Error receiving packet: {}", e);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                }
            }
        });
    }

    /// Spawns task that processes outgoing packet queue
    fn spawn_network_sender(&mut self) {
        let socket = Arc::clone(&self.socket);
        let clients = Arc::clone(&self.clients);
        let mut game_rx = std::mem::replace(&mut self.game_rx, mpsc::unbounded_channel().1);

        tokio::spawn(async move {
            while let Some(message) = game_rx.recv().await {
                match message {
                    GameMessage::SendPacket { packet, addr } => {
                        if let Err(e) = Self::send_packet_impl(&socket, &packet, addr).await {
                            error!("Failed to send packet to {}: {}", addr, e);
                        }
                    }
                    GameMessage::BroadcastPacket { packet } => {
                        let client_addrs = {
                            let clients_guard = clients.read().await;
                            clients_guard.get_client_addrs()
                        };

                        for (client_id, addr) in client_addrs {
                            if let Err(e) = Self::send_packet_impl(&socket, &packet, addr).await {
                                error!("Failed to send to client {}: {}", client_id, e);
                            }
                        }
                    }
                }
            }
        });
    }

    /// Spawns task that drops clients which have gone silent
    fn spawn_timeout_checker(&self) {
        let clients = Arc::clone(&self.clients);
        let server_tx = self.server_tx.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));

            loop {
                interval.tick().await;

                let timed_out = {
                    let mut clients_guard = clients.write().await;
                    clients_guard.check_timeouts()
                };

                for client_id in timed_out {
                    if let Err(e) = server_tx.send(ServerMessage::ClientTimeout { client_id }) {
                        error!("Failed to send timeout message: {}", e);
                        return;
                    }
                }
            }
        });
    }

    async fn send_packet_impl(
        socket: &UdpSocket,
        packet: &Packet,
        addr: SocketAddr,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let data = serialize(packet)?;
        socket.send_to(&data, addr).await?;
        Ok(())
    }

    fn send_packet(&self, packet: Packet, addr: SocketAddr) {
        if let Err(e) = self.game_tx.send(GameMessage::SendPacket { packet, addr }) {
            error!("Failed to queue packet for sending: {}", e);
        }
    }

    fn broadcast_packet(&self, packet: Packet) {
        if let Err(e) = self.game_tx.send(GameMessage::BroadcastPacket { packet }) {
            error!("Failed to queue broadcast packet: {}", e);
        }
    }

    fn snapshot(&self) -> Packet {
        Packet::GameUpdate {
            state: self.session.state().clone(),
        }
    }

    fn send_state(&self, addr: SocketAddr) {
        self.send_packet(self.snapshot(), addr);
    }

    /// Broadcasts the current state to every connected client, whether
    /// or not the action that preceded it changed anything.
    fn broadcast_state(&self) {
        self.broadcast_packet(self.snapshot());
    }

    async fn handle_connect(&mut self, client_version: u32, addr: SocketAddr) {
        info!(
            "Client connecting from {} (version: {})",
            addr, client_version
        );

        if client_version != PROTOCOL_VERSION {
            let response = Packet::Disconnected {
                reason: "Protocol version mismatch".to_string(),
            };
            self.send_packet(response, addr);
            return;
        }

        let client_id = {
            let mut clients = self.clients.write().await;
            // Remove existing connection if present
            if let Some(existing_id) = clients.find_client_by_addr(addr) {
                info!("Removing existing client {} from {}", existing_id, addr);
                clients.remove_client(&existing_id);
            }
            clients.add_client(addr)
        };

        let response = match client_id {
            Some(client_id) => Packet::Connected { client_id },
            None => Packet::Disconnected {
                reason: "Server full".to_string(),
            },
        };
        self.send_packet(response, addr);
    }

    /// Processes an incoming packet and queues the resulting replies
    async fn handle_packet(&mut self, packet: Packet, addr: SocketAddr) {
        if let Packet::Connect { client_version } = packet {
            self.handle_connect(client_version, addr).await;
            return;
        }

        let client_id = {
            let mut clients = self.clients.write().await;
            clients.touch(addr)
        };
        let Some(client_id) = client_id else {
            warn!("Ignoring packet from unconnected address {}", addr);
            return;
        };

        match packet {
            Packet::Join { player_id } => match self.session.join(&player_id) {
                Ok(seat) => {
                    info!("Client {} joined as {}", client_id, seat);
                    self.clients.write().await.assign_seat(client_id, seat);
                    self.send_state(addr);
                }
                Err(e) => {
                    warn!("Client {} failed to join: {}", client_id, e);
                    self.send_packet(
                        Packet::Error {
                            message: e.to_string(),
                        },
                        addr,
                    );
                }
            },

            Packet::RequestState => self.send_state(addr),

            Packet::MoveCard {
                player_id,
                card_id,
                source,
                destination,
            } => {
                match player_id.parse::<PlayerId>() {
                    Ok(player) => {
                        self.session.move_card(player, card_id, source, destination);
                    }
                    Err(e) => debug!("Dropping move from client {}: {}", client_id, e),
                }
                self.broadcast_state();
            }

            Packet::Attack {
                player_id,
                attacker_card_id,
                defender_card_id,
            } => {
                match player_id.parse::<PlayerId>() {
                    Ok(player) => {
                        self.session
                            .attack(player, attacker_card_id, defender_card_id);
                    }
                    Err(e) => debug!("Dropping attack from client {}: {}", client_id, e),
                }
                self.broadcast_state();
            }

            Packet::EndTurn => {
                self.session.end_turn();
                self.broadcast_state();
            }

            Packet::ResetGame => {
                info!("Client {} reset the game", client_id);
                self.session.reset();
                self.broadcast_state();
            }

            Packet::Heartbeat => {}

            Packet::Disconnect => {
                self.clients.write().await.remove_client(&client_id);
            }

            _ => {
                warn!("Unexpected packet type from client {}", client_id);
            }
        }
    }

    /// Main server loop. Packets are handled strictly one at a time, so
    /// every action sees the state left by the previous one.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.spawn_network_receiver();
        self.spawn_network_sender();
        self.spawn_timeout_checker();

        info!("Server started successfully");

        while let Some(message) = self.server_rx.recv().await {
            match message {
                ServerMessage::PacketReceived { packet, addr } => {
                    self.handle_packet(packet, addr).await;
                }
                ServerMessage::ClientTimeout { client_id } => {
                    info!("Client {} timed out", client_id);
                }
            }
        }

        info!("Server shutting down");
        Ok(())
    }
}
