//! Persistence seam between the service and its storage engine.

use std::collections::HashMap;
use std::sync::Mutex;

use derive_more::{Display, Error};
use hare_hounds::{Game, GameId, Snapshot};
use tracing::{debug, info, instrument};

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Storage for game records and their board histories.
///
/// Implementations are synchronous. Callers serialise writes to a single
/// game; the store only has to make each call atomic on its own.
pub trait GameStore: Send + Sync {
    /// Inserts a new game and records its board as the first history entry.
    fn create_game(&self, game: &Game) -> Result<GameId, StoreError>;

    /// Loads a game, or `None` if no game has that id.
    fn find_game(&self, game_id: GameId) -> Result<Option<Game>, StoreError>;

    /// Overwrites a stored game record without touching its history.
    fn save_game(&self, game_id: GameId, game: &Game) -> Result<(), StoreError>;

    /// Overwrites a stored game record and appends `snapshot` to its history,
    /// as one unit.
    fn record_turn(
        &self,
        game_id: GameId,
        game: &Game,
        snapshot: &Snapshot,
    ) -> Result<(), StoreError>;

    /// Every snapshot recorded for a game, oldest first.
    fn history(&self, game_id: GameId) -> Result<Vec<Snapshot>, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryTables {
    last_id: i32,
    games: HashMap<GameId, Game>,
    boards: HashMap<GameId, Vec<Snapshot>>,
}

/// Process-local store backed by hash maps.
///
/// Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating MemoryStore");
        Self::default()
    }

    fn tables(&self) -> Result<std::sync::MutexGuard<'_, MemoryTables>, StoreError> {
        self.tables
            .lock()
            .map_err(|e| StoreError::new(format!("Memory store lock poisoned: {}", e)))
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, game), fields(state = %game.state()))]
    fn create_game(&self, game: &Game) -> Result<GameId, StoreError> {
        let mut tables = self.tables()?;
        tables.last_id += 1;
        let game_id = GameId::new(tables.last_id);
        tables.games.insert(game_id, game.clone());
        tables
            .boards
            .insert(game_id, vec![game.board().to_snapshot()]);
        info!(game_id = %game_id, "Game stored");
        Ok(game_id)
    }

    #[instrument(skip(self))]
    fn find_game(&self, game_id: GameId) -> Result<Option<Game>, StoreError> {
        let game = self.tables()?.games.get(&game_id).cloned();
        debug!(found = game.is_some(), "Game lookup");
        Ok(game)
    }

    #[instrument(skip(self, game), fields(state = %game.state()))]
    fn save_game(&self, game_id: GameId, game: &Game) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        let stored = tables
            .games
            .get_mut(&game_id)
            .ok_or_else(|| StoreError::new(format!("No game with id {}", game_id)))?;
        *stored = game.clone();
        debug!("Game saved");
        Ok(())
    }

    #[instrument(skip(self, game), fields(state = %game.state(), snapshot = %snapshot))]
    fn record_turn(
        &self,
        game_id: GameId,
        game: &Game,
        snapshot: &Snapshot,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        let MemoryTables { games, boards, .. } = &mut *tables;
        let stored = games
            .get_mut(&game_id)
            .ok_or_else(|| StoreError::new(format!("No game with id {}", game_id)))?;
        *stored = game.clone();
        boards.entry(game_id).or_default().push(*snapshot);
        debug!("Turn recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    fn history(&self, game_id: GameId) -> Result<Vec<Snapshot>, StoreError> {
        let history = self
            .tables()?
            .boards
            .get(&game_id)
            .cloned()
            .unwrap_or_default();
        debug!(len = history.len(), "History loaded");
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hare_hounds::{PieceType, PlayerId};

    fn seated_game() -> Game {
        let mut game = Game::new();
        game.create_first_player(PieceType::Hare, PlayerId::new("p1").expect("id"))
            .expect("first join");
        game
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let first = store.create_game(&seated_game()).expect("create");
        let second = store.create_game(&seated_game()).expect("create");
        assert_eq!(first.value() + 1, second.value());
    }

    #[test]
    fn test_create_records_initial_snapshot() {
        let store = MemoryStore::new();
        let game = seated_game();
        let game_id = store.create_game(&game).expect("create");
        assert_eq!(
            store.history(game_id).expect("history"),
            vec![game.board().to_snapshot()]
        );
        assert_eq!(store.find_game(game_id).expect("find"), Some(game));
    }

    #[test]
    fn test_unknown_game() {
        let store = MemoryStore::new();
        let missing = GameId::new(42);
        assert_eq!(store.find_game(missing).expect("find"), None);
        assert!(store.history(missing).expect("history").is_empty());
        assert!(store.save_game(missing, &Game::new()).is_err());
    }

    #[test]
    fn test_record_turn_appends_in_order() {
        let store = MemoryStore::new();
        let game = seated_game();
        let game_id = store.create_game(&game).expect("create");
        let start = game.board().to_snapshot();
        store
            .record_turn(game_id, &game, &start)
            .expect("record");
        assert_eq!(store.history(game_id).expect("history"), vec![start, start]);
    }
}
