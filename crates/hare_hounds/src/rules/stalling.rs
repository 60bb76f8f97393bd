//! Repetition-based stalling detection.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::Snapshot;

/// A snapshot seen this many times in one game means the game is stalled.
pub const STALLING_THRESHOLD: usize = 3;

/// Largest number of times any single snapshot occurs in `history`.
///
/// Zero for an empty history.
pub fn max_repetition<'a, I>(history: I) -> usize
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let mut counts: HashMap<&Snapshot, usize> = HashMap::new();
    for snapshot in history {
        *counts.entry(snapshot).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// Returns true if some snapshot occurs at least [`STALLING_THRESHOLD`] times.
///
/// `history` must already include the snapshot produced by the move being
/// judged.
#[instrument(skip(history))]
pub fn is_stalling<'a, I>(history: I) -> bool
where
    I: IntoIterator<Item = &'a Snapshot>,
{
    let max = max_repetition(history);
    debug!(max_repetition = max, "Checked history for stalling");
    max >= STALLING_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardState, Position};

    fn shifted() -> Snapshot {
        let mut board = BoardState::new();
        board
            .relocate(Position::new(4, 1), Position::new(3, 1))
            .expect("on board");
        board.to_snapshot()
    }

    #[test]
    fn test_empty_history() {
        let history: Vec<Snapshot> = Vec::new();
        assert_eq!(max_repetition(&history), 0);
        assert!(!is_stalling(&history));
    }

    #[test]
    fn test_two_repeats_not_stalling() {
        let start = BoardState::new().to_snapshot();
        let history = [start, shifted(), start];
        assert_eq!(max_repetition(&history), 2);
        assert!(!is_stalling(&history));
    }

    #[test]
    fn test_third_repeat_is_stalling() {
        let start = BoardState::new().to_snapshot();
        let history = [start, shifted(), start, shifted(), start];
        assert_eq!(max_repetition(&history), 3);
        assert!(is_stalling(&history));
    }

    #[test]
    fn test_repeats_need_not_be_consecutive_or_initial() {
        let start = BoardState::new().to_snapshot();
        let other = shifted();
        let history = [start, other, start, other, other];
        assert!(is_stalling(&history));
    }
}
