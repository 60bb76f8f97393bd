//! Win detection after a move.

use tracing::{debug, instrument};

use crate::{BoardState, GameLifecycleState, PieceType};

/// A board-determined end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinCondition {
    /// Every hound stands at or past the hare's x coordinate.
    Escape,
    /// Every neighbour of the hare is occupied.
    Trap,
}

impl WinCondition {
    /// The terminal lifecycle state this condition leads to.
    pub fn state(self) -> GameLifecycleState {
        match self {
            WinCondition::Escape => GameLifecycleState::WinHareByEscape,
            WinCondition::Trap => GameLifecycleState::WinHound,
        }
    }
}

/// Checks the board for a win. Escape is checked before trap.
///
/// Returns `None` when the game continues.
#[instrument(skip(board))]
pub fn check_win(board: &BoardState) -> Option<WinCondition> {
    let hare = board.hare()?;

    let hounds = board.positions_of(PieceType::Hound);
    if hounds.iter().all(|hound| hound.x >= hare.x) {
        debug!(%hare, "Hare has escaped");
        return Some(WinCondition::Escape);
    }

    let trapped = board
        .neighbors_of(hare)
        .into_iter()
        .all(|pos| board.piece_at(pos).is_some_and(|p| !p.is_empty()));
    if trapped {
        debug!(%hare, "Hare is trapped");
        return Some(WinCondition::Trap);
    }

    None
}
