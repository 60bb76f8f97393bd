//! Move legality on the board.
//!
//! Each precondition is its own check so callers and tests can reason about
//! them separately. [`LegalMove`] composes them in the order the rules are
//! applied; the first failing check decides the reason reported.

use tracing::{instrument, warn};

use crate::topology::BoardTopology;
use crate::{BoardState, IllegalMoveReason, PieceType, Position, Role};

/// Precondition: the origin holds a piece of the moving role.
pub struct OwnsPiece;

impl OwnsPiece {
    /// Checks that `from` holds one of `role`'s pieces.
    pub fn check(board: &BoardState, role: Role, from: Position) -> Result<(), IllegalMoveReason> {
        match board.piece_at(from) {
            None => Err(IllegalMoveReason::OffBoard(from)),
            Some(piece) if piece == PieceType::from(role) => Ok(()),
            Some(_) => Err(IllegalMoveReason::NotOwnPiece(from)),
        }
    }
}

/// Precondition: the destination is an empty board position.
pub struct DestinationEmpty;

impl DestinationEmpty {
    /// Checks that `to` is on the board and empty.
    pub fn check(board: &BoardState, to: Position) -> Result<(), IllegalMoveReason> {
        match board.piece_at(to) {
            None => Err(IllegalMoveReason::OffBoard(to)),
            Some(PieceType::Empty) => Ok(()),
            Some(_) => Err(IllegalMoveReason::DestinationOccupied(to)),
        }
    }
}

/// Precondition: origin and destination share an edge.
pub struct SingleEdge;

impl SingleEdge {
    /// Checks adjacency in the board topology.
    pub fn check(from: Position, to: Position) -> Result<(), IllegalMoveReason> {
        if BoardTopology::is_adjacent(from, to) {
            Ok(())
        } else {
            Err(IllegalMoveReason::NotAdjacent(from, to))
        }
    }
}

/// Precondition: hounds never decrease their x coordinate.
pub struct HoundsAdvance;

impl HoundsAdvance {
    /// Checks the no-retreat rule; the hare may move in any direction.
    pub fn check(role: Role, from: Position, to: Position) -> Result<(), IllegalMoveReason> {
        if role == Role::Hound && to.x < from.x {
            Err(IllegalMoveReason::HoundRetreat(from, to))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: a move is legal if every board check passes.
pub struct LegalMove;

impl LegalMove {
    /// Validates a move of `role`'s piece from `from` to `to`.
    ///
    /// Does not look at whose turn it is; that belongs to the lifecycle.
    #[instrument(skip(board))]
    pub fn check(
        board: &BoardState,
        role: Role,
        from: Position,
        to: Position,
    ) -> Result<(), IllegalMoveReason> {
        let result = OwnsPiece::check(board, role, from)
            .and_then(|()| DestinationEmpty::check(board, to))
            .and_then(|()| SingleEdge::check(from, to))
            .and_then(|()| HoundsAdvance::check(role, from, to));
        if let Err(reason) = &result {
            warn!(%reason, "Move rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_hound_opening_move_legal() {
        let board = BoardState::new();
        assert_eq!(LegalMove::check(&board, Role::Hound, p(0, 1), p(1, 1)), Ok(()));
    }

    #[test]
    fn test_hound_cannot_move_hare() {
        let board = BoardState::new();
        assert_eq!(
            LegalMove::check(&board, Role::Hound, p(4, 1), p(3, 1)),
            Err(IllegalMoveReason::NotOwnPiece(p(4, 1)))
        );
    }

    #[test]
    fn test_distance_two_rejected() {
        let board = BoardState::new();
        assert_eq!(
            LegalMove::check(&board, Role::Hound, p(0, 1), p(2, 1)),
            Err(IllegalMoveReason::NotAdjacent(p(0, 1), p(2, 1)))
        );
    }

    #[test]
    fn test_occupied_destination_rejected() {
        let board = BoardState::new();
        assert_eq!(
            LegalMove::check(&board, Role::Hound, p(0, 1), p(1, 0)),
            Err(IllegalMoveReason::DestinationOccupied(p(1, 0)))
        );
    }

    #[test]
    fn test_off_board_origin_rejected() {
        let board = BoardState::new();
        assert_eq!(
            LegalMove::check(&board, Role::Hare, p(9, 9), p(3, 1)),
            Err(IllegalMoveReason::OffBoard(p(9, 9)))
        );
    }

    #[test]
    fn test_off_board_destination_rejected() {
        let board = BoardState::new();
        assert_eq!(
            LegalMove::check(&board, Role::Hare, p(4, 1), p(5, 1)),
            Err(IllegalMoveReason::OffBoard(p(5, 1)))
        );
    }

    #[test]
    fn test_crossing_diagonal_rejected() {
        let mut board = BoardState::new();
        board.relocate(p(0, 1), p(1, 1)).expect("on board");
        // (1,1) -> (2,0) is distance one but both are crossing points.
        assert_eq!(
            LegalMove::check(&board, Role::Hound, p(1, 1), p(2, 0)),
            Err(IllegalMoveReason::NotAdjacent(p(1, 1), p(2, 0)))
        );
    }

    #[test]
    fn test_hound_retreat_rejected() {
        let mut board = BoardState::new();
        board.relocate(p(1, 0), p(2, 0)).expect("on board");
        assert_eq!(
            LegalMove::check(&board, Role::Hound, p(2, 0), p(1, 0)),
            Err(IllegalMoveReason::HoundRetreat(p(2, 0), p(1, 0)))
        );
    }

    #[test]
    fn test_hare_may_move_backward() {
        let mut board = BoardState::new();
        board.relocate(p(4, 1), p(3, 1)).expect("on board");
        assert_eq!(LegalMove::check(&board, Role::Hare, p(3, 1), p(4, 1)), Ok(()));
    }

    #[test]
    fn test_hound_vertical_move_allowed() {
        let board = BoardState::new();
        assert_eq!(LegalMove::check(&board, Role::Hound, p(1, 0), p(1, 1)), Ok(()));
    }
}
