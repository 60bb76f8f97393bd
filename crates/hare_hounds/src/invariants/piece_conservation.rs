//! Piece conservation: one hare and three hounds, always.

use super::Invariant;
use crate::{BoardState, Game, PieceType};

/// Invariant: the board holds exactly one hare and exactly three hounds.
///
/// Moves relocate pieces; nothing creates or removes one.
pub struct PieceConservationInvariant;

impl Invariant<BoardState> for PieceConservationInvariant {
    fn holds(board: &BoardState) -> bool {
        board.positions_of(PieceType::Hare).len() == 1
            && board.positions_of(PieceType::Hound).len() == 3
    }

    fn description() -> &'static str {
        "Board holds exactly one hare and three hounds"
    }
}

impl Invariant<Game> for PieceConservationInvariant {
    fn holds(game: &Game) -> bool {
        <Self as Invariant<BoardState>>::holds(game.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<BoardState>>::description()
    }
}
