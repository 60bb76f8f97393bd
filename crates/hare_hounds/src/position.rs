//! Board coordinates.

use serde::{Deserialize, Serialize};

use crate::topology::BoardTopology;

/// An integer coordinate pair.
///
/// Any pair can be expressed, so move requests coming off the wire carry
/// whatever the client sent. Only the eleven pairs listed in
/// [`BoardTopology::POSITIONS`] are on the board; every lookup against a
/// board treats the rest as off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate; the hare's escape direction is decreasing x.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Creates a coordinate pair. Does not check that it lies on the board.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Index of this position in the fixed enumeration order, if on the board.
    pub fn index(self) -> Option<usize> {
        BoardTopology::index_of(self)
    }

    /// Returns true if this pair is one of the eleven board positions.
    pub fn is_on_board(self) -> bool {
        self.index().is_some()
    }

    /// Chebyshev distance to another position.
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Error raised when a coordinate pair is not a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{} is not a board position", _0)]
pub struct PositionError(pub Position);

impl std::error::Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(Position::new(0, 1).chebyshev(Position::new(1, 1)), 1);
        assert_eq!(Position::new(0, 1).chebyshev(Position::new(1, 2)), 1);
        assert_eq!(Position::new(0, 1).chebyshev(Position::new(2, 1)), 2);
        assert_eq!(Position::new(2, 2).chebyshev(Position::new(2, 2)), 0);
    }

    #[test]
    fn test_on_board() {
        assert!(Position::new(4, 1).is_on_board());
        assert!(!Position::new(0, 0).is_on_board());
        assert!(!Position::new(4, 2).is_on_board());
        assert!(!Position::new(-1, 1).is_on_board());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 2).to_string(), "(3, 2)");
    }
}
