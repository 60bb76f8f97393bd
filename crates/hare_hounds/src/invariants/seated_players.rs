//! Seating invariant: the lifecycle state agrees with who has joined.

use super::Invariant;
use crate::{Game, GameLifecycleState};

/// Invariant: the lifecycle state is consistent with the filled roles.
///
/// - A game waiting for its second player has at most one role filled.
/// - A game mid-play or finished has both roles filled.
pub struct SeatedPlayersInvariant;

impl Invariant<Game> for SeatedPlayersInvariant {
    fn holds(game: &Game) -> bool {
        let seated = usize::from(game.hare_player().is_some())
            + usize::from(game.hound_player().is_some());
        match game.state() {
            GameLifecycleState::WaitingForSecondPlayer => seated <= 1,
            _ => seated == 2,
        }
    }

    fn description() -> &'static str {
        "Lifecycle state matches the number of seated players"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardState, PlayerId};

    fn id(s: &str) -> Option<PlayerId> {
        Some(PlayerId::new(s).expect("id"))
    }

    #[test]
    fn test_waiting_with_one_player_holds() {
        let game = Game::restore(
            GameLifecycleState::WaitingForSecondPlayer,
            BoardState::new(),
            id("a"),
            None,
        );
        assert!(game.is_ok());
    }

    #[test]
    fn test_turn_without_opponent_violates() {
        let game = Game::restore(GameLifecycleState::TurnHound, BoardState::new(), None, id("b"));
        assert!(game.is_err());
    }

    #[test]
    fn test_waiting_with_two_players_violates() {
        let game = Game::restore(
            GameLifecycleState::WaitingForSecondPlayer,
            BoardState::new(),
            id("a"),
            id("b"),
        );
        assert!(game.is_err());
    }
}
