//! Database rows and their conversion to engine types.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use hare_hounds::{BoardState, Game, GameLifecycleState, PlayerId, Snapshot};
use tracing::instrument;

use crate::StoreError;
use crate::db::schema;

/// Text stored in a player column while that seat is empty.
pub const ABSENT_PLAYER: &str = "none";

/// Encodes an optional seat for storage.
///
/// # Errors
///
/// Returns [`StoreError`] for a real id that reads as the absent marker.
#[instrument]
pub fn encode_player(player: Option<&PlayerId>) -> Result<String, StoreError> {
    match player {
        None => Ok(ABSENT_PLAYER.to_string()),
        Some(id) if id.as_str() == ABSENT_PLAYER => Err(StoreError::new(format!(
            "Player id '{}' collides with the absent marker",
            id
        ))),
        Some(id) => Ok(id.to_string()),
    }
}

/// Decodes a stored seat.
///
/// # Errors
///
/// Returns [`StoreError`] if the column is blank.
#[instrument]
pub fn decode_player(column: &str) -> Result<Option<PlayerId>, StoreError> {
    if column == ABSENT_PLAYER {
        return Ok(None);
    }
    PlayerId::new(column)
        .map(Some)
        .map_err(|e| StoreError::new(format!("Invalid stored player id: {}", e)))
}

/// Stored game record.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    state: String,
    board: String,
    player_hare: String,
    player_hound: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Rebuilds the engine's view of this record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if any column fails to parse or the parts do
    /// not form a consistent game.
    #[instrument(skip(self), fields(id = self.id, state = %self.state))]
    pub fn to_game(&self) -> Result<Game, StoreError> {
        let state = GameLifecycleState::from_str(&self.state)
            .map_err(|e| StoreError::new(format!("Invalid stored state '{}': {}", self.state, e)))?;
        let snapshot = Snapshot::from_str(&self.board)
            .map_err(|e| StoreError::new(format!("Invalid stored board: {}", e)))?;

        Game::restore(
            state,
            BoardState::from_snapshot(&snapshot),
            decode_player(&self.player_hare)?,
            decode_player(&self.player_hound)?,
        )
        .map_err(|e| StoreError::new(format!("Inconsistent stored game {}: {}", self.id, e)))
    }
}

/// Column values written for a game, on insert or update.
#[derive(Debug, Clone, Insertable, AsChangeset, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameFields {
    state: String,
    board: String,
    player_hare: String,
    player_hound: String,
}

impl GameFields {
    /// Encodes a game for storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a seated player id cannot be stored.
    #[instrument(skip(game), fields(state = %game.state()))]
    pub fn from_game(game: &Game) -> Result<Self, StoreError> {
        Ok(Self::new(
            game.state().to_string(),
            game.board().to_snapshot().to_string(),
            encode_player(game.hare_player())?,
            encode_player(game.hound_player())?,
        ))
    }
}

/// One entry of a game's board history.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::boards)]
#[diesel(belongs_to(GameRow, foreign_key = game_id))]
pub struct BoardRow {
    id: i32,
    game_id: i32,
    board: String,
    recorded_at: NaiveDateTime,
}

impl BoardRow {
    /// Parses the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the text is not a valid snapshot.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Snapshot::from_str(&self.board)
            .map_err(|e| StoreError::new(format!("Invalid stored history entry {}: {}", self.id, e)))
    }
}

/// Insertable history entry.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::boards)]
pub struct NewBoardRow {
    game_id: i32,
    board: String,
}
