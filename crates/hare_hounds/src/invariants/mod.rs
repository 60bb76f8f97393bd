//! First-class invariants for Hare and Hounds.
//!
//! Invariants are logical properties that must hold for every game a rules
//! engine hands back. They are checked after each move in debug builds and
//! whenever a game is restored from storage.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Joins several violations into one message.
    pub fn summarize(violations: &[InvariantViolation]) -> String {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::error::Error for InvariantViolation {}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod piece_conservation;
pub mod seated_players;

pub use piece_conservation::PieceConservationInvariant;
pub use seated_players::SeatedPlayersInvariant;

/// All game invariants as a composable set.
pub type GameInvariants = (PieceConservationInvariant, SeatedPlayersInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Game, PieceType, PlayerId, Position};

    fn started_game() -> Game {
        let mut game = Game::new();
        game.create_first_player(PieceType::Hound, PlayerId::new("h").expect("id"))
            .expect("first join");
        game.join_second_player(PlayerId::new("r").expect("id"))
            .expect("second join");
        game
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(GameInvariants::check_all(&Game::new()).is_ok());
        assert!(GameInvariants::check_all(&started_game()).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = started_game();
        game.board_mut()
            .set_piece_at(Position::new(2, 1), PieceType::Hare)
            .expect("on board");

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            <PieceConservationInvariant as Invariant<Game>>::description()
        );
    }

    #[test]
    fn test_summarize_joins_descriptions() {
        let violations = vec![InvariantViolation::new("a"), InvariantViolation::new("b")];
        assert_eq!(InvariantViolation::summarize(&violations), "a; b");
    }
}
