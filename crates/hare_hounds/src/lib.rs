//! Hare and Hounds rules engine.
//!
//! One player moves a single hare, the other three hounds, over a fixed
//! 11-position board. This crate holds the rules and nothing else: board
//! topology, piece placement, move legality, turn sequencing and the three
//! ways a game ends (escape, trap, stalling).
//!
//! # Example
//!
//! ```
//! use hare_hounds::{Game, GameLifecycleState, MoveRequest, PieceType, PlayerId, Position};
//!
//! let hounds = PlayerId::new("p1").unwrap();
//! let hare = PlayerId::new("p2").unwrap();
//!
//! let mut game = Game::new();
//! game.create_first_player(PieceType::Hound, hounds.clone()).unwrap();
//! game.join_second_player(hare.clone()).unwrap();
//!
//! let history = vec![game.board().to_snapshot()];
//! let request = MoveRequest::new(hounds, Position::new(0, 1), Position::new(1, 1));
//! let outcome = game.take_turn(&request, &history).unwrap();
//!
//! assert_eq!(outcome.next_player, Some(hare));
//! assert_eq!(game.state(), GameLifecycleState::TurnHare);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod game;
pub mod invariants;
mod matchmaking;
mod position;
pub mod rules;
mod snapshot;
mod topology;
mod types;

pub use action::{IllegalMoveReason, MoveError, MoveRequest};
pub use board::{BoardState, INITIAL_HARE, INITIAL_HOUNDS};
pub use game::{Game, TurnOutcome};
pub use matchmaking::JoinError;
pub use position::{Position, PositionError};
pub use rules::WinCondition;
pub use snapshot::{SNAPSHOT_DELIMITER, Snapshot, SnapshotError};
pub use topology::{BOARD_SIZE, BoardTopology};
pub use types::{EmptyPlayerId, GameId, GameLifecycleState, PieceType, PlayerId, Role};
