//! Per-game lifecycle: alternating turns until a terminal win state.
//!
//! A [`Game`] is plain data owned by the caller. Operations here validate and
//! mutate it in place; nothing is retained between calls, so many games can
//! be driven side by side without sharing state.

use tracing::{debug, info, instrument, warn};

use crate::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use crate::rules::{self, LegalMove, WinCondition};
use crate::{BoardState, GameLifecycleState, MoveError, MoveRequest, PlayerId, Role, Snapshot};

/// State of one game: lifecycle, board and seated players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) state: GameLifecycleState,
    pub(crate) board: BoardState,
    pub(crate) hare_player: Option<PlayerId>,
    pub(crate) hound_player: Option<PlayerId>,
}

impl Game {
    /// Creates an unseated game on the starting layout.
    ///
    /// The state is [`GameLifecycleState::WaitingForSecondPlayer`]; the first
    /// player takes a seat with [`Game::create_first_player`].
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameLifecycleState::WaitingForSecondPlayer,
            board: BoardState::new(),
            hare_player: None,
            hound_player: None,
        }
    }

    /// Rebuilds a game from stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if the parts do not describe a game the
    /// engine could have produced.
    #[instrument(skip(board))]
    pub fn restore(
        state: GameLifecycleState,
        board: BoardState,
        hare_player: Option<PlayerId>,
        hound_player: Option<PlayerId>,
    ) -> Result<Self, InvariantViolation> {
        let game = Self {
            state,
            board,
            hare_player,
            hound_player,
        };
        GameInvariants::check_all(&game).map_err(|violations| {
            let summary = InvariantViolation::summarize(&violations);
            warn!(%summary, "Refusing to restore inconsistent game");
            InvariantViolation::new(summary)
        })?;
        Ok(game)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GameLifecycleState {
        self.state
    }

    /// Current board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    /// The player controlling the hare, if seated.
    pub fn hare_player(&self) -> Option<&PlayerId> {
        self.hare_player.as_ref()
    }

    /// The player controlling the hounds, if seated.
    pub fn hound_player(&self) -> Option<&PlayerId> {
        self.hound_player.as_ref()
    }

    /// The player seated in `role`.
    pub fn player_for(&self, role: Role) -> Option<&PlayerId> {
        match role {
            Role::Hare => self.hare_player(),
            Role::Hound => self.hound_player(),
        }
    }

    /// The role `player` controls.
    ///
    /// `None` if the id is not seated, or is seated in both roles and so does
    /// not name a single side.
    pub fn role_of(&self, player: &PlayerId) -> Option<Role> {
        let is_hare = self.hare_player() == Some(player);
        let is_hound = self.hound_player() == Some(player);
        match (is_hare, is_hound) {
            (true, false) => Some(Role::Hare),
            (false, true) => Some(Role::Hound),
            _ => None,
        }
    }

    /// Returns true once a win state has been reached.
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Applies a move, checking in order: seat, turn, then board rules.
    ///
    /// On success the piece is relocated and, if the resulting board is a
    /// win, the state becomes terminal. The turn is NOT advanced; call
    /// [`Game::next_player`] for that. On error the game is unchanged.
    #[instrument(skip(self, request), fields(state = %self.state, request = %request))]
    pub fn apply_move(&mut self, request: &MoveRequest) -> Result<Option<WinCondition>, MoveError> {
        let role = self.role_of(&request.player_id).ok_or_else(|| {
            warn!(player_id = %request.player_id, "Unknown player attempted move");
            MoveError::InvalidPlayer
        })?;

        if self.state != GameLifecycleState::turn_of(role) {
            warn!(role = %role, state = %self.state, "Move out of turn");
            return Err(MoveError::IncorrectTurn);
        }

        LegalMove::check(&self.board, role, request.from, request.to)?;

        let mut next = self.clone();
        next.board
            .relocate(request.from, request.to)
            .map_err(|e| MoveError::InvariantViolation(e.to_string()))?;

        // Postcondition: verify invariants in debug builds
        #[cfg(debug_assertions)]
        GameInvariants::check_all(&next).map_err(|violations| {
            MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                InvariantViolation::summarize(&violations)
            ))
        })?;

        *self = next;

        let win = rules::check_win(&self.board);
        if let Some(condition) = win {
            self.state = condition.state();
            info!(state = %self.state, "Game over");
        }

        debug!(role = %role, board = %self.board.to_snapshot(), "Move applied");
        Ok(win)
    }

    /// Passes the turn to the other side and returns who moves next.
    ///
    /// Returns `None` and leaves the state alone unless the game is mid-play.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn next_player(&mut self) -> Option<PlayerId> {
        let current = self.state.to_move()?;
        let next = current.opponent();
        self.state = GameLifecycleState::turn_of(next);
        debug!(next = %next, "Turn advanced");
        self.player_for(next).cloned()
    }

    /// Ends the game as a hare win by stalling.
    ///
    /// Only a game in play can stall; returns whether the state changed.
    #[instrument(skip(self), fields(state = %self.state))]
    pub(crate) fn declare_stalling(&mut self) -> bool {
        if self.state.to_move().is_none() {
            return false;
        }
        self.state = GameLifecycleState::WinHareByStalling;
        info!("Game over by stalling");
        true
    }

    /// Plays a full turn: move, stalling check, turn hand-over.
    ///
    /// `history` is every snapshot recorded for this game so far, starting
    /// with the initial layout. The snapshot produced by this move is counted
    /// with it when checking for stalling, and is returned for the caller to
    /// append.
    #[instrument(skip(self, request, history), fields(request = %request, history_len = history.len()))]
    pub fn take_turn(
        &mut self,
        request: &MoveRequest,
        history: &[Snapshot],
    ) -> Result<TurnOutcome, MoveError> {
        let win = self.apply_move(request)?;
        let snapshot = self.board.to_snapshot();

        if win.is_none() && rules::is_stalling(history.iter().chain(std::iter::once(&snapshot))) {
            self.declare_stalling();
        }

        let next_player = self.next_player();
        Ok(TurnOutcome {
            snapshot,
            next_player,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of [`Game::take_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Board after the move, to append to the game's history.
    pub snapshot: Snapshot,
    /// Who moves next, or `None` once the game is over.
    pub next_player: Option<PlayerId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceType, Position};

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s).expect("id")
    }

    /// Hound player "h", hare player "r", hound to move.
    fn started_game() -> Game {
        let mut game = Game::new();
        game.create_first_player(PieceType::Hound, id("h"))
            .expect("first join");
        game.join_second_player(id("r")).expect("second join");
        game
    }

    fn mv(player: &str, from: (i32, i32), to: (i32, i32)) -> MoveRequest {
        MoveRequest::new(id(player), from.into(), to.into())
    }

    #[test]
    fn test_unknown_player_rejected_first() {
        let mut game = started_game();
        // Off-board coordinates would also be illegal, but the seat is checked first.
        let result = game.apply_move(&mv("stranger", (9, 9), (9, 9)));
        assert_eq!(result, Err(MoveError::InvalidPlayer));
    }

    #[test]
    fn test_hare_cannot_move_first() {
        let mut game = started_game();
        let result = game.apply_move(&mv("r", (4, 1), (3, 1)));
        assert_eq!(result, Err(MoveError::IncorrectTurn));
        assert_eq!(game, started_game());
    }

    #[test]
    fn test_successful_move_keeps_turn() {
        let mut game = started_game();
        let result = game.apply_move(&mv("h", (0, 1), (1, 1)));
        assert_eq!(result, Ok(None));
        assert_eq!(game.state(), GameLifecycleState::TurnHound);
        assert_eq!(game.board().piece_at(Position::new(1, 1)), Some(PieceType::Hound));
        assert_eq!(game.board().piece_at(Position::new(0, 1)), Some(PieceType::Empty));
    }

    #[test]
    fn test_next_player_alternates() {
        let mut game = started_game();
        assert_eq!(game.next_player(), Some(id("r")));
        assert_eq!(game.state(), GameLifecycleState::TurnHare);
        assert_eq!(game.next_player(), Some(id("h")));
        assert_eq!(game.state(), GameLifecycleState::TurnHound);
    }

    #[test]
    fn test_next_player_none_while_waiting() {
        let mut game = Game::new();
        game.create_first_player(PieceType::Hare, id("r"))
            .expect("first join");
        assert_eq!(game.next_player(), None);
        assert_eq!(game.state(), GameLifecycleState::WaitingForSecondPlayer);
    }

    #[test]
    fn test_declare_stalling_ignored_after_win() {
        let mut game = started_game();
        game.state = GameLifecycleState::WinHound;
        assert!(!game.declare_stalling());
        assert_eq!(game.state(), GameLifecycleState::WinHound);
    }

    #[test]
    fn test_declare_stalling_ignored_while_waiting() {
        let mut game = Game::new();
        game.create_first_player(PieceType::Hound, id("h"))
            .expect("first join");
        assert!(!game.declare_stalling());
        assert_eq!(game.state(), GameLifecycleState::WaitingForSecondPlayer);
    }

    #[test]
    fn test_take_turn_returns_snapshot_and_next_player() {
        let mut game = started_game();
        let history = vec![BoardState::new().to_snapshot()];
        let outcome = game
            .take_turn(&mv("h", (0, 1), (1, 1)), &history)
            .expect("legal move");
        assert_eq!(outcome.next_player, Some(id("r")));
        assert_eq!(outcome.snapshot, game.board().to_snapshot());
        assert_eq!(game.state(), GameLifecycleState::TurnHare);
    }

    #[test]
    fn test_take_turn_counts_new_snapshot_for_stalling() {
        let mut game = started_game();
        game.state = GameLifecycleState::TurnHare;
        let mut after = game.board().clone();
        after
            .relocate(Position::new(4, 1), Position::new(3, 0))
            .expect("on board");
        // The resulting position has been seen twice already.
        let history = vec![
            BoardState::new().to_snapshot(),
            after.to_snapshot(),
            BoardState::new().to_snapshot(),
            after.to_snapshot(),
        ];
        let outcome = game
            .take_turn(&mv("r", (4, 1), (3, 0)), &history)
            .expect("legal move");
        assert_eq!(game.state(), GameLifecycleState::WinHareByStalling);
        assert_eq!(outcome.next_player, None);
    }

    #[test]
    fn test_role_of_ambiguous_id() {
        let game = Game::restore(
            GameLifecycleState::TurnHound,
            BoardState::new(),
            Some(id("same")),
            Some(id("same")),
        )
        .expect("consistent");
        assert_eq!(game.role_of(&id("same")), None);
    }
}
