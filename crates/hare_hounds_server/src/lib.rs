//! Hare and Hounds game server.
//!
//! Wraps the [`hare_hounds`] rules engine in a REST API with persistent
//! storage.
//!
//! # Architecture
//!
//! - **Store**: [`GameStore`] trait with SQLite ([`SqliteStore`]) and
//!   in-memory ([`MemoryStore`]) implementations
//! - **Service**: [`GameService`] runs each request as one locked
//!   fetch, play and persist cycle per game
//! - **HTTP**: axum routes under `/hareandhounds/api`
//! - **Config**: [`ServerConfig`] from TOML, environment and flags
//!
//! # Example
//!
//! ```no_run
//! use hare_hounds_server::{GameService, MemoryStore, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = router(GameService::new(MemoryStore::new()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod http;
mod service;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_URL_ENV, HOST_ENV, PORT_ENV, ServerConfig};

// Crate-level exports - Persistence
pub use db::{
    ABSENT_PLAYER, BoardRow, GameFields, GameRow, MIGRATIONS, NewBoardRow, SqliteStore,
    decode_player, encode_player,
};
pub use store::{GameStore, MemoryStore, StoreError};

// Crate-level exports - Service
pub use service::{GameLocks, GameService, JoinedGame, MoveSubmission, ServiceError};

// Crate-level exports - HTTP
pub use http::{
    API_CONTEXT, ApiError, BoardSquare, CreateGameRequest, ErrorBody, ErrorReason, SeatResponse,
    StateResponse, TurnRequest, TurnResponse, router,
};
