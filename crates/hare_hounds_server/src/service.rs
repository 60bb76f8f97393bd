//! Game orchestration: one atomic fetch, play and persist cycle per request.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use derive_more::{Display, Error};
use derive_new::new;
use hare_hounds::{
    Game, GameId, GameLifecycleState, IllegalMoveReason, JoinError, MoveError, MoveRequest,
    PieceType, PlayerId, Position, Role,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{GameStore, StoreError};

/// Error returned by [`GameService`] operations.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// No game has the requested id.
    #[display("Unknown game {}", _0)]
    UnknownGame(#[error(not(source))] GameId),

    /// The creator asked for a piece type nobody can play.
    #[display("Invalid piece type '{}'", _0)]
    InvalidPieceType(#[error(not(source))] String),

    /// Both roles are already taken.
    #[display("Game is full")]
    GameFull,

    /// The player is not seated in this game.
    #[display("Player is not seated in this game")]
    InvalidPlayer,

    /// It is not the player's turn.
    #[display("Not this player's turn")]
    IncorrectTurn,

    /// The move breaks a board rule.
    #[display("Illegal move: {}", _0)]
    IllegalMove(#[error(not(source))] IllegalMoveReason),

    /// A stored game no longer satisfies the engine's invariants.
    #[display("Inconsistent game: {}", _0)]
    Inconsistent(#[error(not(source))] String),

    /// The store failed; nothing was changed.
    #[display("{}", _0)]
    Persistence(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err)
    }
}

impl From<MoveError> for ServiceError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::InvalidPlayer => Self::InvalidPlayer,
            MoveError::IncorrectTurn => Self::IncorrectTurn,
            MoveError::IllegalMove(reason) => Self::IllegalMove(reason),
            MoveError::InvariantViolation(message) => Self::Inconsistent(message),
        }
    }
}

impl From<JoinError> for ServiceError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::InvalidPieceType(piece) => Self::InvalidPieceType(piece.to_string()),
            JoinError::AlreadyRegistered | JoinError::NoRoleAvailable => Self::GameFull,
        }
    }
}

/// A player's seat after creating or joining a game.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct JoinedGame {
    /// Game the player sits in.
    pub game_id: GameId,
    /// Freshly issued id the player moves with.
    pub player_id: PlayerId,
    /// Side the player controls.
    pub role: Role,
}

/// A move as submitted by a client, before the player id is validated.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MoveSubmission {
    /// Claimed player id.
    pub player_id: String,
    /// Square the piece leaves.
    pub from: Position,
    /// Square the piece lands on.
    pub to: Position,
}

/// Registry of one mutex per game.
///
/// An entry lives only while some request holds or waits on it, so ids that
/// name no game leave nothing behind.
#[derive(Debug, Default)]
pub struct GameLocks {
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl GameLocks {
    /// Runs `f` while holding the mutex for `game_id`.
    #[instrument(skip(self, f))]
    pub fn with_lock<T>(&self, game_id: GameId, f: impl FnOnce() -> T) -> T {
        let lock = self.acquire(game_id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(game_id, lock);
        result
    }

    /// Number of games with a live entry.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when no request holds or waits on any game.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn acquire(&self, game_id: GameId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(game_id).or_default())
    }

    fn release(&self, game_id: GameId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // The map's handle plus ours: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&game_id);
            debug!(game_id = %game_id, "Game lock released");
        }
    }
}

/// Runs the game rules against a [`GameStore`].
///
/// Join and move requests on the same game are serialised; requests on
/// different games never wait on each other.
#[derive(Debug)]
pub struct GameService<S> {
    store: Arc<S>,
    locks: Arc<GameLocks>,
}

impl<S> Clone for GameService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: GameStore> GameService<S> {
    /// Creates a service over `store`.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating GameService");
        Self {
            store: Arc::new(store),
            locks: Arc::new(GameLocks::default()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The per-game lock registry.
    pub fn locks(&self) -> &GameLocks {
        &self.locks
    }

    /// Opens a new game with its creator seated as `piece_type`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidPieceType`] unless `piece_type` is `HARE` or
    /// `HOUND`.
    #[instrument(skip(self))]
    pub fn create_game(&self, piece_type: &str) -> Result<JoinedGame, ServiceError> {
        let piece = PieceType::from_str(piece_type).map_err(|_| {
            warn!(piece_type, "Unrecognised piece type");
            ServiceError::InvalidPieceType(piece_type.to_string())
        })?;

        let player_id = fresh_player_id()?;
        let mut game = Game::new();
        let role = game.create_first_player(piece, player_id.clone())?;

        let game_id = self.store.create_game(&game).map_err(persistence)?;
        info!(game_id = %game_id, role = %role, "Game created");
        Ok(JoinedGame::new(game_id, player_id, role))
    }

    /// Seats a second player in whichever role is still open.
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownGame`] or [`ServiceError::GameFull`].
    #[instrument(skip(self))]
    pub fn join_game(&self, game_id: GameId) -> Result<JoinedGame, ServiceError> {
        self.locks.with_lock(game_id, || -> Result<JoinedGame, ServiceError> {
            let mut game = self.load(game_id)?;
            let player_id = fresh_player_id()?;
            let role = game.join_second_player(player_id.clone())?;

            self.store.save_game(game_id, &game).map_err(persistence)?;
            info!(role = %role, "Second player joined");
            Ok(JoinedGame::new(game_id, player_id, role))
        })
    }

    /// Plays one move and returns who moves next, if anyone.
    ///
    /// Fetch, rule checks, stalling detection and persistence all happen
    /// under the game's lock. On any error nothing is stored.
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownGame`], [`ServiceError::InvalidPlayer`],
    /// [`ServiceError::IncorrectTurn`], [`ServiceError::IllegalMove`], or a
    /// store failure.
    #[instrument(skip(self, submission), fields(player_id = %submission.player_id, from = %submission.from, to = %submission.to))]
    pub fn submit_move(
        &self,
        game_id: GameId,
        submission: MoveSubmission,
    ) -> Result<Option<PlayerId>, ServiceError> {
        self.locks.with_lock(game_id, || -> Result<Option<PlayerId>, ServiceError> {
            let mut game = self.load(game_id)?;
            let player_id = PlayerId::new(submission.player_id).map_err(|_| {
                warn!("Blank player id");
                ServiceError::InvalidPlayer
            })?;
            let history = self.store.history(game_id).map_err(persistence)?;

            let request = MoveRequest::new(player_id, submission.from, submission.to);
            let outcome = game.take_turn(&request, &history)?;

            self.store
                .record_turn(game_id, &game, &outcome.snapshot)
                .map_err(persistence)?;

            debug!(state = %game.state(), next = ?outcome.next_player, "Turn persisted");
            Ok(outcome.next_player)
        })
    }

    /// Occupied squares of a game's board, in fixed position order.
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownGame`] or a store failure.
    #[instrument(skip(self))]
    pub fn board(&self, game_id: GameId) -> Result<Vec<(Position, PieceType)>, ServiceError> {
        Ok(self.load(game_id)?.board().occupied())
    }

    /// Lifecycle state of a game.
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownGame`] or a store failure.
    #[instrument(skip(self))]
    pub fn state(&self, game_id: GameId) -> Result<GameLifecycleState, ServiceError> {
        Ok(self.load(game_id)?.state())
    }

    fn load(&self, game_id: GameId) -> Result<Game, ServiceError> {
        self.store
            .find_game(game_id)
            .map_err(persistence)?
            .ok_or_else(|| {
                warn!(game_id = %game_id, "Unknown game");
                ServiceError::UnknownGame(game_id)
            })
    }
}

fn persistence(err: StoreError) -> ServiceError {
    error!(error = %err, "Store failure");
    ServiceError::Persistence(err)
}

fn fresh_player_id() -> Result<PlayerId, ServiceError> {
    PlayerId::new(Uuid::new_v4().to_string())
        .map_err(|e| ServiceError::Inconsistent(e.to_string()))
}
