#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::errors::{CommandError, LookupError, StateError, ValidationError};
    use crate::game::state::{GameSession, InvariantViolation, MoveRejection};
    use crate::game::types::{Outcome, Phase, Symbol};
    use crate::server::matchmaking::types::PlayerInfo;

    fn player(id: &str) -> PlayerInfo {
        PlayerInfo { id: id.to_string(), username: format!("{}_name", id) }
    }

    fn new_session() -> GameSession {
        GameSession::new(Uuid::new_v4(), player("alice"), player("bob"))
    }

    fn rejected(err: impl Into<CommandError>) -> MoveRejection {
        MoveRejection::Rejected(err.into())
    }

    #[test]
    fn test_first_dequeued_plays_x_and_moves_first() {
        let session = new_session();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.players[0].id, "alice");
        assert_eq!(snapshot.players[0].symbol, Symbol::X);
        assert_eq!(snapshot.players[1].symbol, Symbol::O);
        assert_eq!(snapshot.current_turn.as_deref(), Some("alice"));
        assert_eq!(snapshot.phase, Phase::Active);
        assert!(snapshot.board.cells().iter().all(Option::is_none));
    }

    #[test]
    fn test_turn_alternates_between_players() {
        let mut session = new_session();
        let moves = [("alice", 0), ("bob", 4), ("alice", 8), ("bob", 2)];
        for (who, pos) in moves {
            assert_eq!(session.turn_holder(), Some(who));
            session.submit_move(who, pos).expect("move accepted");
        }
        assert_eq!(session.turn_holder(), Some("alice"));
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut session = new_session();
        session.submit_move("alice", 4).unwrap();
        let before = session.snapshot();

        assert_eq!(session.submit_move("alice", 0), Err(rejected(ValidationError::NotYourTurn)));
        assert_eq!(session.submit_move("bob", 4), Err(rejected(ValidationError::CellOccupied)));
        assert_eq!(session.submit_move("bob", 12), Err(rejected(ValidationError::InvalidPosition)));
        assert_eq!(session.submit_move("mallory", 1), Err(rejected(ValidationError::NotYourTurn)));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_win_sets_winner_and_line() {
        let mut session = new_session();
        for (who, pos) in [("alice", 0), ("bob", 4), ("alice", 1), ("bob", 5)] {
            session.submit_move(who, pos).unwrap();
        }
        let applied = session.submit_move("alice", 2).unwrap();
        assert!(applied.finished);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Won);
        assert_eq!(snapshot.winner.as_deref(), Some("alice"));
        assert_eq!(snapshot.winning_line, Some([0, 1, 2]));
        assert_eq!(snapshot.current_turn, None);
        assert!(snapshot.game_over);
        assert!(!snapshot.is_draw);

        assert_eq!(session.submit_move("bob", 8), Err(rejected(ValidationError::GameOver)));
    }

    #[test]
    fn test_nine_moves_without_line_is_draw() {
        let mut session = new_session();
        // X O X / X O O / O X X
        let moves = [
            ("alice", 0), ("bob", 1), ("alice", 2), ("bob", 4), ("alice", 3),
            ("bob", 5), ("alice", 7), ("bob", 6), ("alice", 8),
        ];
        for (who, pos) in moves {
            session.submit_move(who, pos).unwrap();
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Draw);
        assert_eq!(snapshot.winner, None);
        assert!(snapshot.is_draw);
        assert_eq!(
            session.outcomes().map(|o| [o[0].1, o[1].1]),
            Some([Outcome::Draw, Outcome::Draw])
        );
    }

    #[test]
    fn test_rematch_rejected_while_active() {
        let mut session = new_session();
        assert_eq!(
            session.rematch("alice"),
            Err(CommandError::State(StateError::CannotRematchWhileActive))
        );
    }

    #[test]
    fn test_rematch_resets_finished_game() {
        let mut session = new_session();
        for (who, pos) in [("alice", 3), ("bob", 0), ("alice", 4), ("bob", 1), ("alice", 8), ("bob", 2)] {
            session.submit_move(who, pos).unwrap();
        }
        assert_eq!(session.winner(), Some("bob"));
        assert_eq!(
            session.outcomes().map(|o| [o[0].1, o[1].1]),
            Some([Outcome::Lost, Outcome::Won])
        );

        assert_eq!(session.rematch("mallory"), Err(CommandError::Lookup(LookupError::NotParticipant)));
        session.rematch("bob").unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(snapshot.current_turn.as_deref(), Some("alice"));
        assert_eq!(snapshot.winner, None);
        assert_eq!(snapshot.winning_line, None);
        assert!(snapshot.board.cells().iter().all(Option::is_none));
        assert_eq!(session.outcomes(), None);
    }

    #[test]
    fn test_unbalanced_board_is_a_fault() {
        let mut session = new_session();
        session.force_cell(0, Symbol::X);
        session.force_cell(1, Symbol::X);
        assert_eq!(
            session.submit_move("alice", 2),
            Err(MoveRejection::Fault(InvariantViolation::UnbalancedBoard { x: 3, o: 0 }))
        );
        assert_eq!(session.snapshot().board.count(Symbol::X), 2);
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let mut session = new_session();
        session.submit_move("alice", 0).unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["board"][0], "X");
        assert!(json["board"][1].is_null());
        assert_eq!(json["phase"], "active");
        assert_eq!(json["current_turn"], "bob");
        assert_eq!(json["players"][1]["symbol"], "O");
    }
}
