//! Property tests over randomly played games.

use hare_hounds::invariants::{GameInvariants, InvariantSet};
use hare_hounds::rules::{WinCondition, check_win, max_repetition};
use hare_hounds::{
    BoardState, BoardTopology, Game, GameLifecycleState, MoveError, MoveRequest, PieceType,
    PlayerId, Position, Role, Snapshot,
};
use proptest::prelude::*;

fn id(s: &str) -> PlayerId {
    PlayerId::new(s).expect("id")
}

fn started_game() -> Game {
    let mut game = Game::new();
    game.create_first_player(PieceType::Hound, id("hounds"))
        .expect("first join");
    game.join_second_player(id("hare")).expect("second join");
    game
}

/// Every legal (from, to) pair for `role` on `board`.
fn legal_moves(board: &BoardState, role: Role) -> Vec<(Position, Position)> {
    board
        .positions_of(role.piece())
        .into_iter()
        .flat_map(|from| {
            board
                .legal_destinations(from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// One ply of a played game.
#[derive(Debug)]
struct Ply {
    role: Role,
    before: BoardState,
    after: BoardState,
    state_after: GameLifecycleState,
    history_after: Vec<Snapshot>,
}

/// Plays up to `choices.len()` plies, picking a legal move by index each time.
fn play_out(choices: &[usize]) -> (Game, Vec<Ply>) {
    let mut game = started_game();
    let mut history = vec![game.board().to_snapshot()];
    let mut plies = Vec::new();

    for choice in choices {
        let Some(role) = game.state().to_move() else {
            break;
        };
        let moves = legal_moves(game.board(), role);
        if moves.is_empty() {
            break;
        }
        let (from, to) = moves[choice % moves.len()];
        let player = game.player_for(role).cloned().expect("seated");
        let before = game.board().clone();
        let outcome = game
            .take_turn(&MoveRequest::new(player, from, to), &history)
            .expect("legal move accepted");
        history.push(outcome.snapshot);
        plies.push(Ply {
            role,
            before,
            after: game.board().clone(),
            state_after: game.state(),
            history_after: history.clone(),
        });
    }
    (game, plies)
}

proptest! {
    #[test]
    fn prop_adjacency_symmetric(a in 0usize..11, b in 0usize..11) {
        let u = BoardTopology::POSITIONS[a];
        let v = BoardTopology::POSITIONS[b];
        prop_assert_eq!(BoardTopology::is_adjacent(u, v), BoardTopology::is_adjacent(v, u));
    }

    #[test]
    fn prop_invariants_hold_through_play(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (game, plies) = play_out(&choices);
        prop_assert!(GameInvariants::check_all(&game).is_ok());
        for ply in &plies {
            prop_assert_eq!(ply.after.positions_of(PieceType::Hare).len(), 1);
            prop_assert_eq!(ply.after.positions_of(PieceType::Hound).len(), 3);
        }
    }

    #[test]
    fn prop_snapshot_round_trip(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (_, plies) = play_out(&choices);
        for ply in &plies {
            let text = ply.after.to_snapshot().to_string();
            let parsed: Snapshot = text.parse().expect("engine snapshots parse");
            prop_assert_eq!(&BoardState::from_snapshot(&parsed), &ply.after);
        }
    }

    #[test]
    fn prop_hounds_never_retreat(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (_, plies) = play_out(&choices);
        for ply in plies.iter().filter(|p| p.role == Role::Hound) {
            let before: i32 = ply.before.positions_of(PieceType::Hound).iter().map(|p| p.x).sum();
            let after: i32 = ply.after.positions_of(PieceType::Hound).iter().map(|p| p.x).sum();
            prop_assert!(after >= before);
        }
    }

    #[test]
    fn prop_roles_alternate(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (_, plies) = play_out(&choices);
        for pair in plies.windows(2) {
            prop_assert_ne!(pair[0].role, pair[1].role);
        }
        if let Some(first) = plies.first() {
            prop_assert_eq!(first.role, Role::Hound);
        }
    }

    #[test]
    fn prop_terminal_state_matches_rules(choices in prop::collection::vec(any::<usize>(), 0..60)) {
        let (_, plies) = play_out(&choices);
        for ply in &plies {
            let expected = match check_win(&ply.after) {
                Some(WinCondition::Escape) => Some(GameLifecycleState::WinHareByEscape),
                Some(WinCondition::Trap) => Some(GameLifecycleState::WinHound),
                None if max_repetition(&ply.history_after) >= 3 => {
                    Some(GameLifecycleState::WinHareByStalling)
                }
                None => None,
            };
            match expected {
                Some(state) => prop_assert_eq!(ply.state_after, state),
                None => prop_assert!(!ply.state_after.is_terminal()),
            }
        }
    }

    #[test]
    fn prop_hound_backward_move_refused(choices in prop::collection::vec(any::<usize>(), 0..20)) {
        let (mut game, _) = play_out(&choices);
        if game.state() != GameLifecycleState::TurnHound {
            return Ok(());
        }
        let player = game.player_for(Role::Hound).cloned().expect("seated");
        for from in game.board().positions_of(PieceType::Hound) {
            for to in game.board().neighbors_of(from) {
                if to.x < from.x {
                    let before = game.clone();
                    let result = game.apply_move(&MoveRequest::new(player.clone(), from, to));
                    prop_assert!(matches!(result, Err(MoveError::IllegalMove(_))));
                    prop_assert_eq!(&game, &before);
                }
            }
        }
    }
}
