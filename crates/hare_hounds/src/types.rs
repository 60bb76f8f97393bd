//! Core domain types for Hare and Hounds.

use serde::{Deserialize, Serialize};

/// What occupies a board position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceType {
    /// The single fleeing piece.
    Hare,
    /// One of the three pursuing pieces.
    Hound,
    /// No piece.
    Empty,
}

impl PieceType {
    /// Returns true for [`PieceType::Empty`].
    pub fn is_empty(self) -> bool {
        matches!(self, PieceType::Empty)
    }
}

/// The side a player controls.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Controls the hare.
    Hare,
    /// Controls all three hounds.
    Hound,
}

impl Role {
    /// Returns the opposing role.
    pub fn opponent(self) -> Self {
        match self {
            Role::Hare => Role::Hound,
            Role::Hound => Role::Hare,
        }
    }

    /// The piece type this role moves.
    pub fn piece(self) -> PieceType {
        self.into()
    }
}

impl From<Role> for PieceType {
    fn from(role: Role) -> Self {
        match role {
            Role::Hare => PieceType::Hare,
            Role::Hound => PieceType::Hound,
        }
    }
}

impl TryFrom<PieceType> for Role {
    type Error = PieceType;

    fn try_from(piece: PieceType) -> Result<Self, Self::Error> {
        match piece {
            PieceType::Hare => Ok(Role::Hare),
            PieceType::Hound => Ok(Role::Hound),
            PieceType::Empty => Err(piece),
        }
    }
}

/// Lifecycle of a single game.
///
/// The three `Win*` states are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameLifecycleState {
    /// One role filled, waiting for an opponent.
    #[default]
    WaitingForSecondPlayer,
    /// The hare player moves next.
    TurnHare,
    /// The hound player moves next.
    TurnHound,
    /// Every hound is level with or behind the hare.
    WinHareByEscape,
    /// A position repeated often enough to call the game stalled.
    WinHareByStalling,
    /// The hare has no empty neighbour.
    WinHound,
}

impl GameLifecycleState {
    /// Returns true for the three win states.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::WinHareByEscape | Self::WinHareByStalling | Self::WinHound
        )
    }

    /// The turn state for `role`.
    pub fn turn_of(role: Role) -> Self {
        match role {
            Role::Hare => Self::TurnHare,
            Role::Hound => Self::TurnHound,
        }
    }

    /// The role expected to move, if the game is mid-play.
    pub fn to_move(self) -> Option<Role> {
        match self {
            Self::TurnHare => Some(Role::Hare),
            Self::TurnHound => Some(Role::Hound),
            _ => None,
        }
    }

    /// The winning role, if the game is over.
    pub fn winner(self) -> Option<Role> {
        match self {
            Self::WinHareByEscape | Self::WinHareByStalling => Some(Role::Hare),
            Self::WinHound => Some(Role::Hound),
            _ => None,
        }
    }
}

/// Opaque identifier of a player.
///
/// Never empty, so no real id can collide with an "absent" marker. Absent
/// players are modelled as `Option<PlayerId>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id, rejecting empty or whitespace-only strings.
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyPlayerId> {
        let id = id.into();
        if id.trim().is_empty() {
            Err(EmptyPlayerId)
        } else {
            Ok(Self(id))
        }
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = EmptyPlayerId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

/// Error returned when building a [`PlayerId`] from blank text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Player id must not be empty")]
pub struct EmptyPlayerId;

/// Identifier of a game, assigned by whoever persists it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GameId(i32);

impl GameId {
    /// Wraps a raw id.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn value(self) -> i32 {
        self.0
    }
}
