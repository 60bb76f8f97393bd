//! Route table and handlers.

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use hare_hounds::GameId;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument};

use crate::http::dto::{
    BoardSquare, CreateGameRequest, SeatResponse, StateResponse, TurnRequest, TurnResponse,
};
use crate::http::error::ApiError;
use crate::{GameService, GameStore, MoveSubmission, ServiceError};

/// Prefix shared by every route.
pub const API_CONTEXT: &str = "/hareandhounds/api";

/// Builds the application router over `service`.
#[instrument(skip(service))]
pub fn router<S: GameStore + 'static>(service: GameService<S>) -> Router {
    let api = Router::new()
        .route("/games", post(create_game::<S>))
        .route("/games/{game_id}", put(join_game::<S>))
        .route("/games/{game_id}/turns", post(submit_turn::<S>))
        .route("/games/{game_id}/board", get(board::<S>))
        .route("/games/{game_id}/state", get(state::<S>))
        .with_state(service);

    Router::new()
        .nest(API_CONTEXT, api)
        .layer(ServiceBuilder::new().map_request(log_request))
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

/// Runs a synchronous service call on the blocking pool.
async fn blocking<T, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| {
            error!(error = %e, "Blocking task failed");
            ApiError::Worker(e.to_string())
        })?
        .map_err(ApiError::from)
}

fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse::<i32>()
        .map(GameId::new)
        .map_err(|_| ApiError::MalformedGameId(raw.to_string()))
}

#[instrument(skip(service, body))]
async fn create_game<S: GameStore + 'static>(
    State(service): State<GameService<S>>,
    body: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SeatResponse>), ApiError> {
    let Json(body) = body?;
    let joined = blocking(move || service.create_game(&body.piece_type)).await?;
    Ok((StatusCode::CREATED, Json(joined.into())))
}

#[instrument(skip(service))]
async fn join_game<S: GameStore + 'static>(
    State(service): State<GameService<S>>,
    Path(game_id): Path<String>,
) -> Result<Json<SeatResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let joined = blocking(move || service.join_game(game_id)).await?;
    Ok(Json(joined.into()))
}

#[instrument(skip(service, body), fields(player_id = tracing::field::Empty))]
async fn submit_turn<S: GameStore + 'static>(
    State(service): State<GameService<S>>,
    Path(game_id): Path<String>,
    body: Result<Json<TurnRequest>, JsonRejection>,
) -> Result<Json<TurnResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let Json(body) = body?;
    tracing::Span::current().record("player_id", body.player_id.as_str());
    let submission = MoveSubmission::new(body.player_id.clone(), body.from(), body.to());
    let next = blocking(move || service.submit_move(game_id, submission)).await?;
    debug!(next = ?next, "Turn accepted");
    Ok(Json(TurnResponse { player_id: next }))
}

#[instrument(skip(service))]
async fn board<S: GameStore + 'static>(
    State(service): State<GameService<S>>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<BoardSquare>>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let squares = blocking(move || service.board(game_id)).await?;
    Ok(Json(squares.into_iter().map(BoardSquare::from).collect()))
}

#[instrument(skip(service))]
async fn state<S: GameStore + 'static>(
    State(service): State<GameService<S>>,
    Path(game_id): Path<String>,
) -> Result<Json<StateResponse>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let state = blocking(move || service.state(game_id)).await?;
    Ok(Json(StateResponse { state }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_id() {
        assert_eq!(parse_game_id("12").expect("numeric"), GameId::new(12));
        assert!(matches!(
            parse_game_id("abc"),
            Err(ApiError::MalformedGameId(_))
        ));
    }
}
