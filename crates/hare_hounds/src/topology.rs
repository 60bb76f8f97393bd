//! The fixed 11-position lattice and its adjacency relation.
//!
//! Positions form three rows: y = 0 holds x in 1..=3, y = 1 holds x in
//! 0..=4 and y = 2 holds x in 1..=3.
//!
//! Adjacency is Chebyshev distance one, minus every edge between two of the
//! crossing points (1,1), (2,2), (3,1) and (2,0). The topology is shared by
//! all games and never changes.

use tracing::instrument;

use crate::Position;

/// Number of positions on the board.
pub const BOARD_SIZE: usize = 11;

/// Stateless access to the board graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardTopology;

impl BoardTopology {
    /// All board positions in the fixed enumeration order used by snapshots.
    pub const POSITIONS: [Position; BOARD_SIZE] = [
        Position::new(1, 0),
        Position::new(2, 0),
        Position::new(3, 0),
        Position::new(0, 1),
        Position::new(1, 1),
        Position::new(2, 1),
        Position::new(3, 1),
        Position::new(4, 1),
        Position::new(1, 2),
        Position::new(2, 2),
        Position::new(3, 2),
    ];

    /// Positions that never share an edge with one another.
    pub const CROSSING_POINTS: [Position; 4] = [
        Position::new(1, 1),
        Position::new(2, 2),
        Position::new(3, 1),
        Position::new(2, 0),
    ];

    /// Index of `pos` in [`Self::POSITIONS`], or `None` when off the board.
    pub fn index_of(pos: Position) -> Option<usize> {
        Self::POSITIONS.iter().position(|p| *p == pos)
    }

    /// Returns true if a single edge joins `u` and `v`.
    ///
    /// Symmetric and irreflexive. Off-board positions have no edges.
    pub fn is_adjacent(u: Position, v: Position) -> bool {
        if !u.is_on_board() || !v.is_on_board() {
            return false;
        }
        if u.chebyshev(v) != 1 {
            return false;
        }
        !(Self::CROSSING_POINTS.contains(&u) && Self::CROSSING_POINTS.contains(&v))
    }

    /// All positions sharing an edge with `pos`, in enumeration order.
    #[instrument(level = "trace")]
    pub fn neighbors(pos: Position) -> Vec<Position> {
        Self::POSITIONS
            .iter()
            .copied()
            .filter(|candidate| Self::is_adjacent(pos, *candidate))
            .collect()
    }
}
