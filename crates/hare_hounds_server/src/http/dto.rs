//! JSON request and response bodies.

use hare_hounds::{GameId, GameLifecycleState, PieceType, PlayerId, Position};
use serde::{Deserialize, Serialize};

use crate::JoinedGame;

/// Body of a create-game request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// `HARE` or `HOUND`. Missing reads as blank, which is refused.
    #[serde(default)]
    pub piece_type: String,
}

/// A player's seat, returned by create and join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatResponse {
    /// Game id.
    pub game_id: GameId,
    /// Id the player must send with every move.
    pub player_id: PlayerId,
    /// Piece type the player controls.
    pub piece_type: PieceType,
}

impl From<JoinedGame> for SeatResponse {
    fn from(joined: JoinedGame) -> Self {
        Self {
            game_id: joined.game_id,
            player_id: joined.player_id,
            piece_type: joined.role.into(),
        }
    }
}

/// Body of a move submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    /// Claimed player id.
    #[serde(default)]
    pub player_id: String,
    /// Origin x.
    pub from_x: i32,
    /// Origin y.
    pub from_y: i32,
    /// Destination x.
    pub to_x: i32,
    /// Destination y.
    pub to_y: i32,
}

impl TurnRequest {
    /// Origin square.
    pub fn from(&self) -> Position {
        Position::new(self.from_x, self.from_y)
    }

    /// Destination square.
    pub fn to(&self) -> Position {
        Position::new(self.to_x, self.to_y)
    }
}

/// Who moves next; `null` once the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    /// Next player to move.
    pub player_id: Option<PlayerId>,
}

/// One occupied square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSquare {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// What stands there.
    pub piece_type: PieceType,
}

impl From<(Position, PieceType)> for BoardSquare {
    fn from((pos, piece_type): (Position, PieceType)) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            piece_type,
        }
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    /// Current state.
    pub state: GameLifecycleState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hare_hounds::Role;

    #[test]
    fn test_seat_uses_camel_case() {
        let seat = SeatResponse::from(JoinedGame::new(
            GameId::new(3),
            PlayerId::new("abc").expect("id"),
            Role::Hound,
        ));
        let json = serde_json::to_value(&seat).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"gameId": 3, "playerId": "abc", "pieceType": "HOUND"})
        );
    }

    #[test]
    fn test_turn_request_reads_coordinates() {
        let body = r#"{"playerId":"p","fromX":0,"fromY":1,"toX":1,"toY":1}"#;
        let request: TurnRequest = serde_json::from_str(body).expect("parse");
        assert_eq!(request.from(), Position::new(0, 1));
        assert_eq!(request.to(), Position::new(1, 1));
    }

    #[test]
    fn test_finished_game_has_null_next_player() {
        let json = serde_json::to_string(&TurnResponse { player_id: None }).expect("serialize");
        assert_eq!(json, r#"{"playerId":null}"#);
    }
}
