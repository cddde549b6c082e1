use treebot::search::eval::{Evaluator, Material, Mobility, Scoring};
use treebot::search::Tree;
use treebot::Position;

const CASES: &[(&str, u32)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
    ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 3),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4),
    ("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 4),
    ("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", 4),
    ("k7/8/8/8/8/8/3qQ3/7K w - - 0 1", 3),
    ("4k3/8/8/8/8/8/p7/KR6 b - - 0 1", 4),
];

fn check_equivalence(evaluator: &dyn Evaluator, fen: &str, max_depth: u32) {
    let pos = Position::from_fen(fen).expect("valid fen");
    let mut tree = Tree::new(pos, evaluator, Scoring::default());
    for depth in 1..=max_depth {
        let pruned = tree.search(depth).expect("search");
        let pruned_leaves = tree.evaluated_leaves();
        let pruned_best = tree.best_move();

        let full = tree.minimax(depth).expect("minimax");
        let full_leaves = tree.evaluated_leaves();
        let full_best = tree.best_move();

        assert_eq!(pruned, full, "value mismatch: {} FEN {fen} depth {depth}", evaluator.name());
        assert_eq!(pruned_best, full_best, "best move mismatch: {} FEN {fen} depth {depth}", evaluator.name());
        assert!(
            pruned_leaves <= full_leaves,
            "pruning visited more leaves: {pruned_leaves} vs {full_leaves} FEN {fen} depth {depth}"
        );
    }
}

#[test]
fn alphabeta_matches_minimax_material() {
    for &(fen, depth) in CASES {
        check_equivalence(&Material, fen, depth);
    }
}

#[test]
fn alphabeta_matches_minimax_mobility() {
    for &(fen, depth) in CASES {
        check_equivalence(&Mobility, fen, depth.min(3));
    }
}

#[test]
fn pruning_saves_leaves_at_startpos() {
    let mut tree = Tree::new(Position::startpos(), &Material, Scoring::default());
    tree.minimax(3).expect("minimax");
    assert_eq!(tree.evaluated_leaves(), 8902);
    tree.search(3).expect("search");
    assert!(tree.evaluated_leaves() < 8902, "alpha-beta pruned nothing: {}", tree.evaluated_leaves());
}
