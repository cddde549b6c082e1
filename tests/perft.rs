use treebot::perft::perft;
use treebot::{Outcome, Position, SearchError};

#[test]
fn perft_startpos_small_depths() {
    let p = Position::startpos();
    assert_eq!(perft(&p, 1).unwrap(), 20);
    assert_eq!(perft(&p, 2).unwrap(), 400);
    assert_eq!(perft(&p, 3).unwrap(), 8902);
}

#[test]
fn perft_endgame() {
    let p = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&p, 1).unwrap(), 14);
    assert_eq!(perft(&p, 2).unwrap(), 191);
    assert_eq!(perft(&p, 3).unwrap(), 2812);
}

#[test]
fn apply_rejects_illegal_moves() {
    let p = Position::startpos();
    let e4 = p.parse_move("e2e4").unwrap();
    let after = p.apply(e4).unwrap();
    // Applying never touches the source position.
    assert_eq!(p.fen(), Position::startpos().fen());
    let err = after.apply(e4).unwrap_err();
    assert!(matches!(err, SearchError::IllegalMove { .. }), "{err:?}");
    assert!(matches!(p.parse_move("e2e5"), Err(SearchError::IllegalMove { .. })));
}

#[test]
fn invalid_fen_is_reported() {
    let err = Position::from_fen("not a fen").unwrap_err();
    assert!(matches!(err, SearchError::InvalidFen { .. }), "{err:?}");
}

#[test]
fn outcomes() {
    // (fen, outcome, has legal moves)
    let cases = [
        ("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1", Some(Outcome::WhiteWins), false),
        ("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3", Some(Outcome::BlackWins), false),
        ("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Some(Outcome::Draw), false),
        // Fifty-move rule: drawn although moves remain.
        ("4k3/8/8/8/8/8/8/R3K3 w - - 100 80", Some(Outcome::Draw), true),
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", None, true),
    ];
    for (fen, expected, has_moves) in cases {
        let p = Position::from_fen(fen).unwrap();
        assert_eq!(p.outcome(), expected, "FEN {fen}");
        assert_eq!(!p.legal_moves().is_empty(), has_moves, "FEN {fen}");
    }
}

#[test]
fn check_detection_and_null_move() {
    let checked = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
    assert!(checked.is_check());
    assert!(checked.null_move().is_none());
    let quiet = Position::startpos();
    assert!(!quiet.is_check());
    let passed = quiet.null_move().expect("null move");
    assert_eq!(passed.side_to_move(), cozy_chess::Color::Black);
}
