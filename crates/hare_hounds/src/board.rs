//! Piece placement over the board topology.

use tracing::{debug, instrument};

use crate::topology::{BOARD_SIZE, BoardTopology};
use crate::{PieceType, Position, PositionError, Snapshot};

/// Hound starting positions.
pub const INITIAL_HOUNDS: [Position; 3] = [
    Position::new(0, 1),
    Position::new(1, 0),
    Position::new(1, 2),
];

/// Hare starting position.
pub const INITIAL_HARE: Position = Position::new(4, 1);

/// Placement of one hare and three hounds over the eleven positions.
///
/// Built only from the initial layout or a validated [`Snapshot`]; the rules
/// engine relocates pieces and never creates or destroys one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Squares in [`BoardTopology::POSITIONS`] order.
    squares: [PieceType; BOARD_SIZE],
}

impl BoardState {
    /// Creates the starting layout.
    pub fn new() -> Self {
        let mut squares = [PieceType::Empty; BOARD_SIZE];
        for hound in INITIAL_HOUNDS {
            if let Some(i) = hound.index() {
                squares[i] = PieceType::Hound;
            }
        }
        if let Some(i) = INITIAL_HARE.index() {
            squares[i] = PieceType::Hare;
        }
        Self { squares }
    }

    /// Gets the piece at `pos`, or `None` if `pos` is off the board.
    pub fn piece_at(&self, pos: Position) -> Option<PieceType> {
        pos.index().map(|i| self.squares[i])
    }

    /// Overwrites the piece at `pos`.
    ///
    /// This is a raw edit: it can break the one-hare-three-hounds rule. Use it
    /// to stage boards in tests; game play goes through [`crate::Game`].
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if `pos` is off the board.
    #[instrument(skip(self))]
    pub fn set_piece_at(&mut self, pos: Position, piece: PieceType) -> Result<(), PositionError> {
        let i = pos.index().ok_or(PositionError(pos))?;
        self.squares[i] = piece;
        Ok(())
    }

    /// Positions currently holding `piece`, in enumeration order.
    pub fn positions_of(&self, piece: PieceType) -> Vec<Position> {
        BoardTopology::POSITIONS
            .iter()
            .zip(self.squares.iter())
            .filter(|(_, p)| **p == piece)
            .map(|(pos, _)| *pos)
            .collect()
    }

    /// The hare's position.
    pub fn hare(&self) -> Option<Position> {
        self.positions_of(PieceType::Hare).first().copied()
    }

    /// Positions joined to `pos` by an edge.
    pub fn neighbors_of(&self, pos: Position) -> Vec<Position> {
        BoardTopology::neighbors(pos)
    }

    /// Empty neighbours of `pos` that its occupant could step to.
    ///
    /// Hounds never move to a smaller x. Empty or off-board positions have
    /// no destinations.
    pub fn legal_destinations(&self, pos: Position) -> Vec<Position> {
        let Some(piece) = self.piece_at(pos) else {
            return Vec::new();
        };
        if piece.is_empty() {
            return Vec::new();
        }
        self.neighbors_of(pos)
            .into_iter()
            .filter(|to| self.piece_at(*to) == Some(PieceType::Empty))
            .filter(|to| piece != PieceType::Hound || to.x >= pos.x)
            .collect()
    }

    /// Occupied positions and their pieces, in enumeration order.
    pub fn occupied(&self) -> Vec<(Position, PieceType)> {
        BoardTopology::POSITIONS
            .iter()
            .zip(self.squares.iter())
            .filter(|(_, p)| !p.is_empty())
            .map(|(pos, p)| (*pos, *p))
            .collect()
    }

    /// Returns all squares in enumeration order.
    pub fn squares(&self) -> &[PieceType; BOARD_SIZE] {
        &self.squares
    }

    /// Canonical serialized form.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::from_squares(self.squares)
    }

    /// Rebuilds a board from its serialized form.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            squares: *snapshot.pieces(),
        }
    }

    /// Moves whatever stands on `from` to `to`, leaving `from` empty.
    ///
    /// Callers validate the move first.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> Result<(), PositionError> {
        let piece = self.piece_at(from).ok_or(PositionError(from))?;
        let to_index = to.index().ok_or(PositionError(to))?;
        debug!(%from, %to, ?piece, "Relocating piece");
        self.set_piece_at(from, PieceType::Empty)?;
        self.squares[to_index] = piece;
        Ok(())
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Snapshot> for BoardState {
    fn from(snapshot: &Snapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

impl std::fmt::Display for BoardState {
    /// Renders the three rows, `R` for the hare, `H` for hounds, `.` for empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..3 {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..5 {
                let symbol = match self.piece_at(Position::new(x, y)) {
                    Some(PieceType::Hare) => 'R',
                    Some(PieceType::Hound) => 'H',
                    Some(PieceType::Empty) => '.',
                    None => ' ',
                };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = BoardState::new();
        assert_eq!(
            board.positions_of(PieceType::Hound),
            vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 2)]
        );
        assert_eq!(board.positions_of(PieceType::Hare), vec![Position::new(4, 1)]);
        assert_eq!(board.positions_of(PieceType::Empty).len(), 7);
    }

    #[test]
    fn test_initial_snapshot_text() {
        assert_eq!(
            BoardState::new().to_snapshot().to_string(),
            "HOUND_EMPTY_EMPTY_HOUND_EMPTY_EMPTY_EMPTY_HARE_HOUND_EMPTY_EMPTY"
        );
    }

    #[test]
    fn test_piece_at_off_board() {
        let board = BoardState::new();
        assert_eq!(board.piece_at(Position::new(0, 0)), None);
        assert_eq!(board.piece_at(Position::new(4, 1)), Some(PieceType::Hare));
    }

    #[test]
    fn test_set_piece_at_off_board() {
        let mut board = BoardState::new();
        let result = board.set_piece_at(Position::new(5, 5), PieceType::Hound);
        assert_eq!(result, Err(PositionError(Position::new(5, 5))));
    }

    #[test]
    fn test_relocate_conserves_pieces() {
        let mut board = BoardState::new();
        board
            .relocate(Position::new(0, 1), Position::new(1, 1))
            .expect("both on board");
        assert_eq!(board.piece_at(Position::new(0, 1)), Some(PieceType::Empty));
        assert_eq!(board.piece_at(Position::new(1, 1)), Some(PieceType::Hound));
        assert_eq!(board.positions_of(PieceType::Hound).len(), 3);
    }

    #[test]
    fn test_legal_destinations_hound_cannot_retreat() {
        let mut board = BoardState::new();
        board
            .relocate(Position::new(1, 0), Position::new(2, 1))
            .expect("both on board");
        let destinations = board.legal_destinations(Position::new(2, 1));
        assert!(destinations.iter().all(|p| p.x >= 2));
        assert!(destinations.contains(&Position::new(3, 1)));
        assert!(!destinations.contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_legal_destinations_hare_start() {
        let board = BoardState::new();
        assert_eq!(board.legal_destinations(Position::new(4, 1)).len(), 3);
        assert!(board.legal_destinations(Position::new(2, 1)).is_empty());
    }

    #[test]
    fn test_occupied_lists_four_pieces() {
        let occupied = BoardState::new().occupied();
        assert_eq!(occupied.len(), 4);
        assert_eq!(occupied[0], (Position::new(1, 0), PieceType::Hound));
    }

    #[test]
    fn test_display() {
        assert_eq!(BoardState::new().to_string(), " H.. \nH...R\n H.. ");
    }
}
