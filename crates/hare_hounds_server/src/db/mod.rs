//! SQLite persistence for game records and board histories.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use models::{
    ABSENT_PLAYER, BoardRow, GameFields, GameRow, NewBoardRow, decode_player, encode_player,
};
pub use repository::{MIGRATIONS, SqliteStore};
