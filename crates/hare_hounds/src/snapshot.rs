//! Canonical serialized form of a board.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::topology::BOARD_SIZE;
use crate::PieceType;

/// Separator between piece tokens in the text form.
pub const SNAPSHOT_DELIMITER: char = '_';

/// One piece type per board position, in [`crate::BoardTopology::POSITIONS`] order.
///
/// Equality is exact placement equality, which is what repetition counting
/// needs. Every snapshot holds exactly one hare and three hounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Snapshot([PieceType; BOARD_SIZE]);

impl Snapshot {
    /// Builds a snapshot from an ordered piece sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the sequence is not eleven long or does not
    /// hold exactly one hare and three hounds.
    #[instrument(skip(pieces), fields(len = pieces.len()))]
    pub fn from_pieces(pieces: &[PieceType]) -> Result<Self, SnapshotError> {
        let squares: [PieceType; BOARD_SIZE] = pieces
            .try_into()
            .map_err(|_| SnapshotError::WrongLength(pieces.len()))?;
        Self::check_counts(&squares)?;
        Ok(Self(squares))
    }

    /// Wraps squares already known to satisfy the piece counts.
    pub(crate) fn from_squares(squares: [PieceType; BOARD_SIZE]) -> Self {
        Self(squares)
    }

    /// The ordered pieces.
    pub fn pieces(&self) -> &[PieceType; BOARD_SIZE] {
        &self.0
    }

    fn check_counts(squares: &[PieceType; BOARD_SIZE]) -> Result<(), SnapshotError> {
        let hares = squares.iter().filter(|p| **p == PieceType::Hare).count();
        let hounds = squares.iter().filter(|p| **p == PieceType::Hound).count();
        if hares != 1 || hounds != 3 {
            return Err(SnapshotError::PieceCount { hares, hounds });
        }
        Ok(())
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, piece) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SNAPSHOT_DELIMITER}")?;
            }
            write!(f, "{piece}")?;
        }
        Ok(())
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pieces = s
            .split(SNAPSHOT_DELIMITER)
            .map(|token| {
                PieceType::from_str(token).map_err(|_| SnapshotError::UnknownToken(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pieces(&pieces)
    }
}

impl TryFrom<String> for Snapshot {
    type Error = SnapshotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Snapshot> for String {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.to_string()
    }
}

/// Error that can occur when decoding a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// The sequence does not have one entry per board position.
    #[display("Snapshot has {} entries, expected {}", _0, BOARD_SIZE)]
    WrongLength(usize),

    /// A token is not a piece type.
    #[display("Unknown piece token '{}'", _0)]
    UnknownToken(String),

    /// The pieces do not add up to one hare and three hounds.
    #[display("Snapshot holds {} hares and {} hounds, expected 1 and 3", hares, hounds)]
    PieceCount {
        /// Hares found.
        hares: usize,
        /// Hounds found.
        hounds: usize,
    },
}

impl std::error::Error for SnapshotError {}
