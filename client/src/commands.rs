use shared::{CardId, Packet, PlayerId, ZoneKind};
use std::fmt;

pub const HELP: &str = "\
Commands:
  join <player1|player2>       take a seat (deals your opening hand)
  state                        ask the server for the current state
  deploy <card>                move a card from hand to board
  recall <card>                move a ready card from board back to hand
  attack <attacker> <defender> strike an enemy card with one of yours
  end                          end the current turn
  reset                        start a new game
  help                         show this text
  quit                         disconnect and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join(String),
    State,
    Deploy(CardId),
    Recall(CardId),
    Attack { attacker: CardId, defender: CardId },
    EndTurn,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidCardId(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("empty command"),
            CommandError::Unknown(word) => write!(f, "unknown command '{}', try 'help'", word),
            CommandError::MissingArgument(name) => write!(f, "missing {}", name),
            CommandError::InvalidCardId(raw) => write!(f, "'{}' is not a card id", raw),
        }
    }
}

impl std::error::Error for CommandError {}

fn card_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<CardId, CommandError> {
    let raw = words.next().ok_or(CommandError::MissingArgument(name))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidCardId(raw.to_string()))
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(CommandError::Empty)?;

    match verb.to_lowercase().as_str() {
        "join" => words
            .next()
            .map(|player| Command::Join(player.to_string()))
            .ok_or(CommandError::MissingArgument("player id")),
        "state" | "s" => Ok(Command::State),
        "deploy" | "play" => card_arg(&mut words, "card id").map(Command::Deploy),
        "recall" => card_arg(&mut words, "card id").map(Command::Recall),
        "attack" | "a" => {
            let attacker = card_arg(&mut words, "attacker card id")?;
            let defender = card_arg(&mut words, "defender card id")?;
            Ok(Command::Attack { attacker, defender })
        }
        "end" | "endturn" => Ok(Command::EndTurn),
        "reset" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_string())),
    }
}

impl Command {
    /// Converts the command into the packet to send, acting as `seat`.
    ///
    /// Returns None for local commands and for seat-bound commands when
    /// no seat has been joined yet.
    pub fn into_packet(self, seat: Option<PlayerId>) -> Option<Packet> {
        match self {
            Command::Join(player_id) => Some(Packet::Join { player_id }),
            Command::State => Some(Packet::RequestState),
            Command::EndTurn => Some(Packet::EndTurn),
            Command::Reset => Some(Packet::ResetGame),
            Command::Deploy(card_id) => seat.map(|seat| Packet::MoveCard {
                player_id: seat.to_string(),
                card_id,
                source: ZoneKind::Hand,
                destination: ZoneKind::Board,
            }),
            Command::Recall(card_id) => seat.map(|seat| Packet::MoveCard {
                player_id: seat.to_string(),
                card_id,
                source: ZoneKind::Board,
                destination: ZoneKind::Hand,
            }),
            Command::Attack { attacker, defender } => seat.map(|seat| Packet::Attack {
                player_id: seat.to_string(),
                attacker_card_id: attacker,
                defender_card_id: defender,
            }),
            Command::Help | Command::Quit => None,
        }
    }

    pub fn needs_seat(&self) -> bool {
        matches!(
            self,
            Command::Deploy(_) | Command::Recall(_) | Command::Attack { .. }
        )
    }
}
