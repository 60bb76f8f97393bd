//! REST transport over [`crate::GameService`].

mod dto;
mod error;
mod routes;

pub use dto::{BoardSquare, CreateGameRequest, SeatResponse, StateResponse, TurnRequest, TurnResponse};
pub use error::{ApiError, ErrorBody, ErrorReason};
pub use routes::{API_CONTEXT, router};
