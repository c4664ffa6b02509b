use crate::commands::{parse_command, Command, HELP};
use crate::rendering::render_state;
use bincode::{deserialize, serialize};
use log::{error, info, warn};
use shared::{GameState, Packet, PlayerId, MAX_PACKET_SIZE, PROTOCOL_VERSION};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;
use tokio::time::interval;

pub struct Client {
    socket: UdpSocket,
    server_addr: SocketAddr,
    client_id: Option<u32>,
    connected: bool,

    /// Seat requested by the last `join`, confirmed by the next snapshot
    pending_seat: Option<String>,
    seat: Option<PlayerId>,
    last_state: Option<GameState>,

    heartbeat: Duration,
}

impl Client {
    pub async fn new(
        server_addr: &str,
        heartbeat: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        let server_addr = server_addr.parse()?;

        Ok(Client {
            socket,
            server_addr,
            client_id: None,
            connected: false,
            pending_seat: None,
            seat: None,
            last_state: None,
            heartbeat,
        })
    }

    pub fn client_id(&self) -> Option<u32> {
        self.client_id
    }

    pub fn seat(&self) -> Option<PlayerId> {
        self.seat
    }

    /// Most recent snapshot received from the server
    pub fn last_state(&self) -> Option<&GameState> {
        self.last_state.as_ref()
    }

    async fn connect(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Connecting to {}...", self.server_addr);

        let packet = Packet::Connect {
            client_version: PROTOCOL_VERSION,
        };
        self.send_packet(&packet).await
    }

    async fn send_packet(&self, packet: &Packet) -> Result<(), Box<dyn std::error::Error>> {
        let data = serialize(packet)?;
        self.socket.send_to(&data, self.server_addr).await?;
        Ok(())
    }

    fn handle_packet(&mut self, packet: Packet) {
        match packet {
            Packet::Connected { client_id } => {
                info!("Connected! Client ID: {}", client_id);
                self.client_id = Some(client_id);
                self.connected = true;
            }

            Packet::GameUpdate { state } => {
                self.confirm_seat(&state);
                println!("{}", render_state(&state, self.seat));
                self.last_state = Some(state);
            }

            Packet::Error { message } => {
                self.pending_seat = None;
                println!("Server error: {}", message);
            }

            Packet::Disconnected { reason } => {
                warn!("Disconnected: {}", reason);
                self.connected = false;
                self.client_id = None;
            }

            _ => {
                warn!("Unexpected packet type");
            }
        }
    }

    /// Takes the requested seat once a snapshot shows it dealt. Snapshots
    /// broadcast for other clients' actions may arrive before the join reply.
    fn confirm_seat(&mut self, state: &GameState) {
        let Some(requested) = &self.pending_seat else {
            return;
        };
        match requested.parse::<PlayerId>() {
            Ok(seat) if state.player(seat).initialized => {
                println!("Seated as {}", seat);
                self.seat = Some(seat);
                self.pending_seat = None;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("{}", e);
                self.pending_seat = None;
            }
        }
    }

    /// Runs a console command. Returns false when the client should exit.
    async fn handle_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                return true;
            }
        };

        match command {
            Command::Help => {
                println!("{}", HELP);
                return true;
            }
            Command::Quit => return false,
            Command::Join(ref player_id) => self.pending_seat = Some(player_id.clone()),
            ref other if other.needs_seat() && self.seat.is_none() => {
                println!("Join a seat first, e.g. 'join player1'");
                return true;
            }
            _ => {}
        }

        if let Some(packet) = command.into_packet(self.seat) {
            if let Err(e) = self.send_packet(&packet).await {
                error!("Error sending command: {}", e);
            }
        }
        true
    }

    pub async fn run(
        &mut self,
        auto_join: Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.connect().await?;
        if let Some(player_id) = auto_join {
            self.handle_line(&format!("join {}", player_id)).await;
        }
        println!("Type 'help' for a list of commands");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut heartbeat_interval = interval(self.heartbeat);
        let mut buffer = vec![0u8; MAX_PACKET_SIZE];

        loop {
            tokio::select! {
                result = self.socket.recv_from(&mut buffer) => {
                    match result {
                        Ok((len, _)) => {
                            match deserialize::<Packet>(&buffer[0..len]) {
                                Ok(packet) => self.handle_packet(packet),
                                Err(e) => warn!("Failed to deserialize packet: {}", e),
                            }
                        },
                        Err(e) => error!("Error receiving packet: {}", e),
                    }
                },

                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            if !self.handle_line(&line).await {
                                break;
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            error!("Error reading input: {}", e);
                            break;
                        }
                    }
                },

                _ = heartbeat_interval.tick() => {
                    if self.connected {
                        if let Err(e) = self.send_packet(&Packet::Heartbeat).await {
                            error!("Error sending heartbeat: {}", e);
                        }
                    }
                },
            }
        }

        if self.connected {
            let _ = self.send_packet(&Packet::Disconnect).await;
        }

        Ok(())
    }
}
