use super::*;
use crate::board::castle_rights::CastleRights;
use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::position::Position;
use crate::board::Board;
use crate::board_position;
use crate::chess_move::Move;
use crate::chess_search::{SearchConfig, SearchEngine};
use crate::move_generator;

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

fn play(state: &GameState, from: Position, to: Position) -> GameState {
    let chess_move = state
        .find_move(from, to, None)
        .unwrap_or_else(|| panic!("{} -> {} should be legal", from, to));
    state.apply(&chess_move).unwrap()
}

fn wizard_position() -> GameState {
    let board = board_position! {
        k.........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ....p.....
        .....W...K
    };
    GameState::from_board(board, Color::White).unwrap()
}

fn back_rank_mate() -> GameState {
    let board = board_position! {
        R....k....
        ....ppp...
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .........K
    };
    GameState::from_board(board, Color::Black).unwrap()
}

#[test]
fn test_initial_state() {
    let state = GameState::new();
    assert_eq!(state.current_player(), Color::White);
    assert_eq!(state.legal_moves().len(), 26);
    assert_eq!(state.castling_rights(), CastleRights::all());
    assert!(!state.is_terminal());
    assert!(state.move_history().is_empty());
    assert_eq!(state.winner(), None);
}

#[test]
fn test_wizard_teleport_scenario() {
    let state = wizard_position();
    let teleport = state.find_move(pos(9, 5), pos(7, 5), None).unwrap();
    assert!(teleport.is_wizard_teleport());

    let next = state.apply(&teleport).unwrap();
    assert_eq!(next.board().get(pos(9, 5)), None);
    assert_eq!(
        next.board().get(pos(7, 5)),
        Some(Piece::new(PieceKind::Wizard, Color::White).moved())
    );
    assert_eq!(next.current_player(), Color::Black);
    assert_eq!(next.move_history(), &[teleport]);
}

#[test]
fn test_wizard_ranged_attack_scenario() {
    let state = wizard_position();
    let attack = state.find_move(pos(9, 5), pos(8, 4), None).unwrap();
    assert!(attack.is_wizard_attack());

    let next = state.apply(&attack).unwrap();
    assert!(next
        .board()
        .get(pos(9, 5))
        .unwrap()
        .is(PieceKind::Wizard, Color::White));
    assert_eq!(next.board().get(pos(8, 4)), None);
    assert_eq!(next.current_player(), Color::Black);
}

#[test]
fn test_apply_leaves_original_state_untouched() {
    let state = wizard_position();
    let before = state.clone();
    let attack = state.find_move(pos(9, 5), pos(8, 4), None).unwrap();
    let _ = state.apply(&attack).unwrap();
    assert_eq!(state, before);
}

#[test]
fn test_out_of_turn_is_rejected() {
    let state = GameState::new();
    let pawn = Piece::new(PieceKind::Pawn, Color::Black);
    let chess_move = Move::plain(pos(1, 0), pos(2, 0), pawn, None);
    assert!(matches!(
        state.apply(&chess_move),
        Err(GameError::OutOfTurn {
            expected: Color::White,
            actual: Color::Black
        })
    ));
}

#[test]
fn test_move_outside_legal_set_is_rejected() {
    let state = GameState::new();
    let pawn = Piece::new(PieceKind::Pawn, Color::White);
    let too_far = Move::plain(pos(8, 0), pos(5, 0), pawn, None);
    assert!(matches!(
        state.apply(&too_far),
        Err(GameError::InvalidMove { .. })
    ));

    // a wizard "teleport" onto an occupied square is not a legal move
    let wizard = Piece::new(PieceKind::Wizard, Color::White);
    let onto_pawn = Move::teleport(pos(9, 3), pos(8, 3), wizard);
    assert!(matches!(
        state.apply(&onto_pawn),
        Err(GameError::InvalidMove { .. })
    ));
}

#[test]
fn test_move_with_off_board_square_is_rejected() {
    let state = GameState::new();
    let pawn = Piece::new(PieceKind::Pawn, Color::White);

    let from_off_board = Move::plain(pos(12, 3), pos(7, 3), pawn, None);
    assert!(matches!(
        state.apply(&from_off_board),
        Err(GameError::InvalidMove { .. })
    ));
    let to_off_board = Move::plain(pos(8, 3), pos(8, 13), pawn, None);
    assert!(matches!(
        state.apply(&to_off_board),
        Err(GameError::InvalidMove { .. })
    ));
}

#[test]
fn test_off_board_move_does_not_deserialize() {
    let push = GameState::new()
        .find_move(pos(8, 3), pos(7, 3), None)
        .unwrap();
    let mut value = serde_json::to_value(push).unwrap();
    assert_eq!(serde_json::from_value::<Move>(value.clone()).unwrap(), push);

    value["from"]["row"] = 12.into();
    assert!(serde_json::from_value::<Move>(value).is_err());
}

#[test]
fn test_castling_after_king_moved_is_rejected() {
    let mut board = Board::new();
    board
        .put(pos(9, 5), Piece::new(PieceKind::King, Color::White).moved())
        .unwrap();
    board
        .put(pos(9, 9), Piece::new(PieceKind::Rook, Color::White))
        .unwrap();
    board
        .put(pos(0, 5), Piece::new(PieceKind::King, Color::Black))
        .unwrap();
    let state = GameState::from_board(board, Color::White).unwrap();

    let king = Piece::new(PieceKind::King, Color::White).moved();
    let castle = Move::castle(pos(9, 5), pos(9, 7), king, pos(9, 9), pos(9, 6));
    assert!(matches!(
        state.apply(&castle),
        Err(GameError::InvalidMove { .. })
    ));
    assert_eq!(state.board().get(pos(9, 5)), Some(king));
    assert!(state.board().get(pos(9, 7)).is_none());
}

#[test]
fn test_castling_moves_king_and_rook() {
    let board = board_position! {
        .....k....
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        R....K...R
    };
    let state = GameState::from_board(board, Color::White).unwrap();
    let castle = state.find_move(pos(9, 5), pos(9, 7), None).unwrap();
    assert!(castle.is_castling());

    let next = state.apply(&castle).unwrap();
    assert!(next.board().get(pos(9, 7)).unwrap().is(PieceKind::King, Color::White));
    assert!(next.board().get(pos(9, 6)).unwrap().is(PieceKind::Rook, Color::White));
    assert_eq!(next.board().get(pos(9, 5)), None);
    assert_eq!(next.board().get(pos(9, 9)), None);
    assert!(!next.castling_rights().contains(CastleRights::white_queenside()));
}

#[test]
fn test_castling_rights_survive_json_but_not_king_moves() {
    let mut state = GameState::new();
    state = play(&state, pos(8, 5), pos(7, 5));
    state = play(&state, pos(1, 0), pos(2, 0));
    state = play(&state, pos(9, 5), pos(8, 5));
    assert_eq!(
        state.castling_rights(),
        CastleRights::for_color(Color::Black)
    );

    let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_promotion_defaults_to_queen() {
    let board = board_position! {
        .....k....
        ..P.......
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .........K
    };
    let state = GameState::from_board(board, Color::White).unwrap();

    let default = state.find_move(pos(1, 2), pos(0, 2), None).unwrap();
    assert_eq!(default.promotion_kind(), Some(PieceKind::Queen));

    let wizard = state
        .find_move(pos(1, 2), pos(0, 2), Some(PieceKind::Wizard))
        .unwrap();
    let next = state.apply(&wizard).unwrap();
    assert!(next.board().get(pos(0, 2)).unwrap().is(PieceKind::Wizard, Color::White));
}

#[test]
fn test_back_rank_mate_scenario() {
    let state = back_rank_mate();
    assert!(is_checkmate(&state));
    assert!(is_in_check(&state));
    assert!(!is_stalemate(&state));
    assert!(state.legal_moves().is_empty());
    assert_eq!(state.winner(), Some(Color::White));

    let pawn = Piece::new(PieceKind::Pawn, Color::Black);
    let push = Move::plain(pos(1, 4), pos(2, 4), pawn, None);
    assert!(matches!(
        apply(&state, &push),
        Err(GameError::GameAlreadyEnded)
    ));
}

#[test]
fn test_mate_is_detected_after_apply() {
    let board = board_position! {
        .....k....
        ....ppp...
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        R........K
    };
    let state = GameState::from_board(board, Color::White).unwrap();
    let next = play(&state, pos(9, 0), pos(0, 0));
    assert!(next.is_checkmate());
    assert_eq!(next.winner(), Some(Color::White));
    assert!(next.is_terminal());
}

#[test]
fn test_stalemate() {
    let board = board_position! {
        k.........
        ..Q.......
        .K........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
    };
    let state = GameState::from_board(board, Color::Black).unwrap();
    assert!(is_stalemate(&state));
    assert!(!is_checkmate(&state));
    assert_eq!(state.winner(), None);
    assert!(state.is_terminal());
}

#[test]
fn test_from_board_validation() {
    let no_black_king = board_position! {
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .....K....
    };
    assert!(matches!(
        GameState::from_board(no_black_king, Color::White),
        Err(GameError::KingNotFound {
            color: Color::Black
        })
    ));

    let two_kings = board_position! {
        k........k
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .....K....
    };
    assert!(matches!(
        GameState::from_board(two_kings, Color::White),
        Err(GameError::InvalidPosition { .. })
    ));

    // black is in check, so it cannot be white's move
    let waiting_in_check = board_position! {
        .....k....
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .....R..K.
    };
    assert!(matches!(
        GameState::from_board(waiting_in_check, Color::White),
        Err(GameError::InvalidPosition { .. })
    ));
}

#[test]
fn test_from_json_rejects_garbage_and_kingless_boards() {
    assert!(matches!(
        GameState::from_json("{not json"),
        Err(GameError::Serialization(_))
    ));

    let state = GameState::new();
    let mut value = serde_json::to_value(&state).unwrap();
    value["board"][9][5] = serde_json::Value::Null;
    assert!(matches!(
        GameState::from_json(&value.to_string()),
        Err(GameError::KingNotFound {
            color: Color::White
        })
    ));
}

#[test]
fn test_from_json_rejects_off_board_history() {
    let state = play(&GameState::new(), pos(8, 3), pos(7, 3));
    let mut value = serde_json::to_value(&state).unwrap();
    value["moveHistory"][0]["to"] = serde_json::json!({ "row": 40, "col": 40 });

    assert!(matches!(
        GameState::from_json(&value.to_string()),
        Err(GameError::Serialization(_))
    ));
}

#[test]
fn test_json_shape() {
    let value = serde_json::to_value(GameState::new()).unwrap();
    assert_eq!(value["currentPlayer"], "white");
    assert_eq!(value["board"][0][3]["type"], "wizard");
    assert_eq!(value["board"][0][3]["hasMoved"], false);
    assert!(value["moveHistory"].as_array().unwrap().is_empty());
    assert_eq!(value["isCheckmate"], false);
    assert!(value["winner"].is_null());
}

#[test]
fn test_resignation() {
    let state = GameState::new();
    let resigned = state.resign(Color::White).unwrap();
    assert_eq!(resigned.winner(), Some(Color::Black));
    assert!(resigned.is_terminal());
    assert!(resigned.legal_moves().is_empty());
    assert!(matches!(
        resigned.resign(Color::Black),
        Err(GameError::GameAlreadyEnded)
    ));

    let restored = GameState::from_json(&resigned.to_json().unwrap()).unwrap();
    assert_eq!(restored, resigned);
}

#[test]
fn test_legal_moves_for_ui_never_fail() {
    let state = GameState::new();
    // empty square
    assert!(legal_moves(&state, pos(5, 5)).is_empty());
    // opponent's piece
    assert!(legal_moves(&state, pos(1, 4)).is_empty());
    // blocked piece
    assert!(legal_moves(&state, pos(9, 0)).is_empty());
    // pawn double step
    assert_eq!(legal_moves(&state, pos(8, 4)), vec![pos(7, 4), pos(6, 4)]);
    // the queenside wizard can only reach d3
    assert_eq!(legal_moves(&state, pos(9, 3)), vec![pos(7, 3)]);
}

#[test]
fn test_promotion_destinations_are_not_repeated() {
    let board = board_position! {
        .....k....
        .P........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .........K
    };
    let state = GameState::from_board(board, Color::White).unwrap();
    assert_eq!(legal_moves(&state, pos(1, 1)), vec![pos(0, 1)]);
}

#[test]
fn test_capturing_corner_rook_with_wizard_drops_castling_right() {
    let board = board_position! {
        r....k...r
        .........W
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        .....K....
    };
    let state = GameState::from_board(board, Color::White).unwrap();
    assert_eq!(
        state.castling_rights(),
        CastleRights::for_color(Color::Black)
    );

    let attack = state.find_move(pos(1, 9), pos(0, 9), None).unwrap();
    assert!(attack.is_wizard_attack());
    let next = state.apply(&attack).unwrap();
    assert_eq!(next.castling_rights(), CastleRights::black_queenside());
}

#[test]
fn test_legal_moves_never_leave_own_king_in_check() {
    let mut frontier = vec![GameState::new()];
    for _ in 0..2 {
        let mut next_frontier = Vec::new();
        for state in &frontier {
            for chess_move in state.legal_moves() {
                let next = state.apply(&chess_move).unwrap();
                let mover = chess_move.piece.color;
                assert!(!move_generator::is_in_check(next.board(), mover));
                assert_eq!(next.board().count(PieceKind::King, Color::White), 1);
                assert_eq!(next.board().count(PieceKind::King, Color::Black), 1);
                next_frontier.push(next);
            }
        }
        frontier = next_frontier;
    }
    assert_eq!(frontier.len(), 676);
}

#[test]
fn test_position_hash_tracks_side_to_move() {
    let state = wizard_position();
    let board = state.board().clone();
    let black_to_move = GameState::from_board(board, Color::Black).unwrap();
    assert_ne!(state.position_hash(), black_to_move.position_hash());
    assert_eq!(
        state.position_hash(),
        GameState::from_board(state.board().clone(), Color::White)
            .unwrap()
            .position_hash()
    );
}

#[test]
fn test_count_positions() {
    let state = GameState::new();
    assert_eq!(state.count_positions(1), 26);
    assert_eq!(back_rank_mate().count_positions(1), 0);
    assert_eq!(count_positions(&state, 2), 676);
}

fn engine() -> SearchEngine {
    SearchEngine::with_seed(
        SearchConfig {
            depth: 2,
            ..SearchConfig::default()
        },
        7,
    )
}

#[test]
fn test_session_phases() {
    let mut session = GameSession::new(engine());
    assert_eq!(session.phase(), GamePhase::Menu);

    let pawn = Piece::new(PieceKind::Pawn, Color::White);
    let push = Move::plain(pos(8, 4), pos(7, 4), pawn, None);
    assert!(matches!(
        session.submit_move(&push),
        Err(GameError::GameNotStarted)
    ));

    session.start().unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);
    session.submit_move(&push).unwrap();
    assert_eq!(session.state().current_player(), Color::Black);

    session.resign(Color::Black).unwrap();
    assert_eq!(session.phase(), GamePhase::Ended);
    assert_eq!(session.state().winner(), Some(Color::White));

    assert!(matches!(session.start(), Err(GameError::GameAlreadyEnded)));
    assert!(matches!(
        session.play_engine_move(),
        Err(GameError::GameAlreadyEnded)
    ));
}

#[test]
fn test_session_rejected_move_keeps_state() {
    let mut session = GameSession::new(engine());
    session.start().unwrap();
    let before = session.state().clone();

    let pawn = Piece::new(PieceKind::Pawn, Color::White);
    let illegal = Move::plain(pos(8, 4), pos(4, 4), pawn, None);
    assert!(session.submit_move(&illegal).is_err());
    assert_eq!(session.state(), &before);
}

#[test]
fn test_session_engine_delivers_mate() {
    let board = board_position! {
        .....k....
        ....ppp...
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        ..........
        R........K
    };
    let state = GameState::from_board(board, Color::White).unwrap();
    let mut session = GameSession::from_state(state, engine());
    session.start().unwrap();

    let chess_move = session.play_engine_move().unwrap().unwrap();
    assert_eq!(chess_move.to, pos(0, 0));
    assert_eq!(session.phase(), GamePhase::Ended);
    assert_eq!(session.state().winner(), Some(Color::White));
}

#[test]
fn test_session_from_decided_position_is_ended() {
    let mut session = GameSession::from_state(back_rank_mate(), engine());
    session.start().unwrap();
    assert_eq!(session.phase(), GamePhase::Ended);
}
