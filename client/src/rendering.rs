use shared::{CardInstance, GameState, PlayerId, PlayerState};
use std::fmt::Write;

pub fn format_card(card: &CardInstance) -> String {
    let mut text = format!(
        "#{} {} ({} mana) {}/{}",
        card.id, card.name, card.mana_cost, card.attack, card.health
    );
    if card.ready_to_attack {
        text.push_str(" [ready]");
    }
    text
}

fn format_zone(cards: &[CardInstance]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join(", ")
}

fn write_player(
    out: &mut String,
    id: PlayerId,
    label: &str,
    player: &PlayerState,
    show_hand: bool,
) {
    let _ = writeln!(
        out,
        "{}{}  HP {}  Mana {}  Deck {}  Hand {}",
        id,
        label,
        player.health,
        player.mana_amount,
        player.deck.len(),
        player.hand.len()
    );
    if !player.initialized {
        let _ = writeln!(out, "  (not joined yet)");
        return;
    }
    if show_hand {
        let _ = writeln!(out, "  Hand:  {}", format_zone(&player.hand));
    }
    let _ = writeln!(out, "  Board: {}", format_zone(&player.board));
}

/// Renders the state as text. With a perspective, the opponent is shown
/// first and their hand is reduced to a count.
pub fn render_state(state: &GameState, perspective: Option<PlayerId>) -> String {
    let mut out = String::new();

    let turn_note = match perspective {
        Some(me) if me == state.turn => " (your turn)",
        Some(_) => " (opponent's turn)",
        None => "",
    };
    let _ = writeln!(out, "=== Turn: {}{} ===", state.turn, turn_note);

    match perspective {
        Some(me) => {
            let opponent = me.other();
            write_player(&mut out, opponent, " (opponent)", state.player(opponent), false);
            write_player(&mut out, me, " (you)", state.player(me), true);
        }
        None => {
            for id in PlayerId::ALL {
                write_player(&mut out, id, "", state.player(id), true);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CardId;

    fn card(id: u64, name: &str, ready: bool) -> CardInstance {
        CardInstance {
            id: CardId(id),
            name: name.to_string(),
            mana_cost: 2,
            attack: 3,
            health: 4,
            base_health: 4,
            image: String::new(),
            ready_to_attack: ready,
        }
    }

    fn sample_state() -> GameState {
        let mut state = GameState::new();
        state.players.player1.initialized = true;
        state.players.player1.hand.push(card(1, "Mopp", false));
        state.players.player1.board.push(card(2, "Pan", true));
        state.players.player2.initialized = true;
        state.players.player2.hand.push(card(3, "Hardhat", false));
        state
    }

    #[test]
    fn test_format_card() {
        assert_eq!(format_card(&card(7, "Pan", false)), "#7 Pan (2 mana) 3/4");
        assert_eq!(
            format_card(&card(7, "Pan", true)),
            "#7 Pan (2 mana) 3/4 [ready]"
        );
    }

    #[test]
    fn test_render_from_perspective_hides_opponent_hand() {
        let text = render_state(&sample_state(), Some(PlayerId::Player1));

        assert!(text.starts_with("=== Turn: player1 (your turn) ==="));
        assert!(text.contains("#1 Mopp"));
        assert!(text.contains("#2 Pan (2 mana) 3/4 [ready]"));
        assert!(!text.contains("Hardhat"));
        assert!(text.find("player2 (opponent)") < text.find("player1 (you)"));
    }

    #[test]
    fn test_render_as_observer_shows_everything() {
        let text = render_state(&sample_state(), None);

        assert!(text.starts_with("=== Turn: player1 ==="));
        assert!(text.contains("Mopp"));
        assert!(text.contains("Hardhat"));
    }

    #[test]
    fn test_render_opponent_turn() {
        let text = render_state(&sample_state(), Some(PlayerId::Player2));
        assert!(text.contains("(opponent's turn)"));
    }

    #[test]
    fn test_render_unjoined_player() {
        let text = render_state(&GameState::new(), None);
        assert_eq!(text.matches("(not joined yet)").count(), 2);
    }
}
