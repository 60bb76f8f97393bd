//! Seating the two players of a game.

use tracing::{info, instrument, warn};

use crate::{Game, GameLifecycleState, PieceType, PlayerId, Role};

/// Error that can occur when a player tries to join a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum JoinError {
    /// The first player asked for a piece type no one can play.
    #[display("{} is not a playable piece type", _0)]
    InvalidPieceType(PieceType),

    /// The game already has a player; the first seat is taken.
    #[display("Game already has a player")]
    AlreadyRegistered,

    /// No role is open to a second player.
    #[display("No role available")]
    NoRoleAvailable,
}

impl std::error::Error for JoinError {}

impl Game {
    /// Seats the first player in the role of their choosing.
    ///
    /// Succeeds only on a game with nobody seated. Leaves the game waiting for
    /// a second player.
    #[instrument(skip(self))]
    pub fn create_first_player(
        &mut self,
        piece: PieceType,
        player_id: PlayerId,
    ) -> Result<Role, JoinError> {
        if self.hare_player.is_some() || self.hound_player.is_some() {
            warn!("First seat already taken");
            return Err(JoinError::AlreadyRegistered);
        }
        let role = Role::try_from(piece).map_err(JoinError::InvalidPieceType)?;

        match role {
            Role::Hare => self.hare_player = Some(player_id),
            Role::Hound => self.hound_player = Some(player_id),
        }
        self.state = GameLifecycleState::WaitingForSecondPlayer;
        info!(role = %role, "First player seated");
        Ok(role)
    }

    /// Seats the second player in whichever role is still open.
    ///
    /// Hounds always move first, so the game goes to
    /// [`GameLifecycleState::TurnHound`] whichever role was assigned.
    #[instrument(skip(self))]
    pub fn join_second_player(&mut self, player_id: PlayerId) -> Result<Role, JoinError> {
        let role = match (&self.hare_player, &self.hound_player) {
            (Some(_), None) => Role::Hound,
            (None, Some(_)) => Role::Hare,
            _ => {
                warn!("No open role for second player");
                return Err(JoinError::NoRoleAvailable);
            }
        };

        match role {
            Role::Hare => self.hare_player = Some(player_id),
            Role::Hound => self.hound_player = Some(player_id),
        }
        self.state = GameLifecycleState::TurnHound;
        info!(role = %role, "Second player seated");
        Ok(role)
    }
}
