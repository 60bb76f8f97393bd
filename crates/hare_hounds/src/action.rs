//! Move requests and the ways they can be refused.
//!
//! A move is a domain event: who asked, and which edge they want to walk.
//! It is validated against a game before anything on the board changes.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{PlayerId, Position};

/// A player's request to move one of their pieces along a single edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    /// The player asking to move.
    pub player_id: PlayerId,
    /// Where the piece stands.
    pub from: Position,
    /// Where it should go.
    pub to: Position,
}

impl MoveRequest {
    /// Creates a move request.
    #[instrument(skip(player_id), fields(player_id = %player_id))]
    pub fn new(player_id: PlayerId, from: Position, to: Position) -> Self {
        Self {
            player_id,
            from,
            to,
        }
    }
}

impl std::fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.player_id, self.from, self.to)
    }
}

/// Why a structurally well-formed move was refused by the board rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IllegalMoveReason {
    /// The origin or destination is not a board position.
    #[display("{} is not on the board", _0)]
    OffBoard(Position),

    /// The origin does not hold one of the player's pieces.
    #[display("No piece of yours at {}", _0)]
    NotOwnPiece(Position),

    /// The destination already holds a piece.
    #[display("{} is occupied", _0)]
    DestinationOccupied(Position),

    /// Origin and destination are not joined by a single edge.
    #[display("{} and {} are not adjacent", _0, _1)]
    NotAdjacent(Position, Position),

    /// A hound tried to decrease its x coordinate.
    #[display("Hounds cannot move back from {} to {}", _0, _1)]
    HoundRetreat(Position, Position),
}

/// Error that can occur when applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The requesting id is not seated in this game.
    #[display("Player is not part of this game")]
    InvalidPlayer,

    /// The game is not waiting on this player's role.
    #[display("It is not this player's turn")]
    IncorrectTurn,

    /// The board rules refuse the move.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMoveReason),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

impl From<IllegalMoveReason> for MoveError {
    fn from(reason: IllegalMoveReason) -> Self {
        MoveError::IllegalMove(reason)
    }
}
