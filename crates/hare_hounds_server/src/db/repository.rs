//! SQLite-backed [`GameStore`].

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use hare_hounds::{Game, GameId, Snapshot};
use tracing::{debug, error, info, instrument};

use crate::db::models::{BoardRow, GameFields, GameRow, NewBoardRow};
use crate::db::schema::{boards, games};
use crate::{GameStore, StoreError};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applied to every new connection. Writers from other connections wait up
/// to five seconds for the lock instead of failing at once.
const CONNECTION_PRAGMAS: &str =
    "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;";

/// Game store over a SQLite database file.
///
/// Opens a fresh connection per call, so the store itself is trivially
/// `Send + Sync`. Connections run in WAL mode with a busy timeout, and
/// writes take the database lock up front, so concurrent writers queue. An in-process `":memory:"` path would give every call its
/// own empty database; use [`crate::MemoryStore`] for that instead.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Creates a store for the database at `db_path`.
    ///
    /// The file is created on first connection if it does not exist.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn new(db_path: impl AsRef<str>) -> Self {
        info!("Creating SqliteStore");
        Self {
            db_path: db_path.as_ref().to_string(),
        }
    }

    /// Path of the backing database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })?;
        conn.batch_execute(CONNECTION_PRAGMAS).map_err(|e| {
            StoreError::new(format!("Failed to configure '{}': {}", self.db_path, e))
        })?;
        Ok(conn)
    }

    /// Applies any pending schema migrations and returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database is unreachable or a migration
    /// fails.
    #[instrument(skip(self), fields(db_path = %self.db_path))]
    pub fn run_migrations(&self) -> Result<usize, StoreError> {
        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            error!(error = %e, "Migration failed");
            StoreError::new(format!("Migration failed: {}", e))
        })?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }
}

impl GameStore for SqliteStore {
    #[instrument(skip(self, game), fields(state = %game.state()))]
    fn create_game(&self, game: &Game) -> Result<GameId, StoreError> {
        let fields = GameFields::from_game(game)?;
        let mut conn = self.connection()?;

        let game_id = conn.immediate_transaction::<_, StoreError, _>(|conn| {
            let row = diesel::insert_into(games::table)
                .values(&fields)
                .returning(GameRow::as_returning())
                .get_result(conn)?;

            diesel::insert_into(boards::table)
                .values(&NewBoardRow::new(*row.id(), fields.board().clone()))
                .execute(conn)?;

            Ok(GameId::new(*row.id()))
        })?;

        info!(game_id = %game_id, "Game stored");
        Ok(game_id)
    }

    #[instrument(skip(self))]
    fn find_game(&self, game_id: GameId) -> Result<Option<Game>, StoreError> {
        let mut conn = self.connection()?;

        let row = games::table
            .find(game_id.value())
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "Game lookup");
        row.map(|r| r.to_game()).transpose()
    }

    #[instrument(skip(self, game), fields(state = %game.state()))]
    fn save_game(&self, game_id: GameId, game: &Game) -> Result<(), StoreError> {
        let fields = GameFields::from_game(game)?;
        let mut conn = self.connection()?;

        let updated = diesel::update(games::table.find(game_id.value()))
            .set((&fields, games::updated_at.eq(chrono::Utc::now().naive_utc())))
            .execute(&mut conn)?;

        if updated != 1 {
            return Err(StoreError::new(format!("No game with id {}", game_id)));
        }
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
        let fields = GameFields::from_game(game)?;
        let mut conn = self.connection()?;

        conn.immediate_transaction::<_, StoreError, _>(|conn| {
            let updated = diesel::update(games::table.find(game_id.value()))
                .set((&fields, games::updated_at.eq(chrono::Utc::now().naive_utc())))
                .execute(conn)?;
            if updated != 1 {
                return Err(StoreError::new(format!("No game with id {}", game_id)));
            }

            diesel::insert_into(boards::table)
                .values(&NewBoardRow::new(game_id.value(), snapshot.to_string()))
                .execute(conn)?;
            Ok(())
        })?;

        debug!("Turn recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    fn history(&self, game_id: GameId) -> Result<Vec<Snapshot>, StoreError> {
        let mut conn = self.connection()?;

        let rows = boards::table
            .filter(boards::game_id.eq(game_id.value()))
            .order(boards::id.asc())
            .select(BoardRow::as_select())
            .load(&mut conn)?;

        debug!(len = rows.len(), "History loaded");
        rows.iter().map(BoardRow::snapshot).collect()
    }
}
