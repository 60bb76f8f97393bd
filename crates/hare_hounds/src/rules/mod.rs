//! Game rules for Hare and Hounds.
//!
//! This module contains pure functions for evaluating a board according to
//! the rules. Rules are separated from board storage and from the lifecycle
//! state machine so each can be checked on its own.

pub mod movement;
pub mod stalling;
pub mod win;

pub use movement::{DestinationEmpty, HoundsAdvance, LegalMove, OwnsPiece, SingleEdge};
pub use stalling::{STALLING_THRESHOLD, is_stalling, max_repetition};
pub use win::{WinCondition, check_win};
