//! End-to-end solver tests: feasibility oracle short-circuits, both solve
//! modes, inventory limits, symmetry dedup and progress ordering

use patioplan::algorithm::executor::solve;
use patioplan::algorithm::search::ProgressEvent;
use patioplan::io::messages::{
    BalanceRequest, PlacedTile, SolveReply, SolveRequest, TileSpec, WeightSpec,
};
use std::collections::HashSet;

fn domino(count: Option<usize>) -> TileSpec {
    TileSpec {
        name: "domino".to_string(),
        base: vec![[0, 0], [1, 0]],
        allow_rotate: true,
        allow_reflect: false,
        count,
    }
}

fn first_only() -> BalanceRequest {
    BalanceRequest::FirstOnly { no_balance: true }
}

fn balanced(cap: usize) -> BalanceRequest {
    BalanceRequest::Balanced {
        weights: WeightSpec {
            tile_count_variance: 1.0,
            orientation_balance: 1.0,
            seam_penalty: 1.0,
            cross_joints: 1.0,
        },
        desired_mix: None,
        max_solutions_to_evaluate: Some(cap),
    }
}

fn request(
    width: u32,
    height: u32,
    holes: Vec<[i32; 2]>,
    tile_types: Vec<TileSpec>,
    balance: BalanceRequest,
) -> SolveRequest {
    SolveRequest {
        width,
        height,
        holes,
        tile_types,
        unique_by_board_symmetry: false,
        balance,
        cap: None,
        seed: Some(7),
    }
}

fn run(request: &SolveRequest) -> SolveReply {
    solve(request, &mut |_| {})
}

/// Assert the layout partitions the free set exactly
fn assert_exact_cover(width: i32, height: i32, holes: &[[i32; 2]], layout: &[PlacedTile]) {
    let hole_set: HashSet<[i32; 2]> = holes.iter().copied().collect();
    let mut covered = HashSet::new();
    for placement in layout {
        for &cell in &placement.cells {
            let [x, y] = cell;
            assert!(
                x >= 0 && y >= 0 && x < width && y < height,
                "cell ({x},{y}) is off the board"
            );
            assert!(!hole_set.contains(&cell), "cell ({x},{y}) is a hole");
            assert!(covered.insert(cell), "cell ({x},{y}) covered twice");
        }
    }
    let free = (width * height) as usize - hole_set.len();
    assert_eq!(covered.len(), free, "layout does not cover every free cell");
}

// Scenario: 2x2 board, unbounded dominoes, first-only mode
#[test]
fn test_two_by_two_first_only() {
    let reply = run(&request(2, 2, vec![], vec![domino(None)], first_only()));
    match reply {
        SolveReply::Result {
            found,
            layout,
            score,
        } => {
            assert_eq!(found, 1);
            assert_eq!(layout.len(), 2);
            assert!(score.is_none());
            assert_exact_cover(2, 2, &[], &layout);
        }
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Scenario: up to symmetry the 2x2 board has exactly one domino layout
#[test]
fn test_two_by_two_unique_up_to_symmetry() {
    let mut req = request(2, 2, vec![], vec![domino(None)], balanced(100));
    req.unique_by_board_symmetry = true;
    match run(&req) {
        SolveReply::Result { found, score, .. } => {
            assert_eq!(found, 1);
            assert!(score.is_some());
        }
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Scenario: 3x3 board with dominoes fails the parity rule
#[test]
fn test_three_by_three_dominoes_infeasible() {
    match run(&request(3, 3, vec![], vec![domino(None)], first_only())) {
        SolveReply::Infeasible { reasons } => {
            assert!(reasons
                .iter()
                .any(|r| r.contains("odd number of unit cells")));
        }
        other => unreachable!("expected infeasible, got {other:?}"),
    }
}

// Scenario: chessboard minus two same-colored corners fails the coloring rule
#[test]
fn test_mutilated_chessboard_infeasible() {
    let reply = run(&request(
        8,
        8,
        vec![[0, 0], [7, 7]],
        vec![domino(None)],
        first_only(),
    ));
    match reply {
        SolveReply::Infeasible { reasons } => {
            assert_eq!(reasons.len(), 1);
            assert!(reasons[0].contains("checkerboard"));
        }
        other => unreachable!("expected infeasible, got {other:?}"),
    }
}

// Scenario: 4x4 board, four fixed 2x2 squares, unique layout
#[test]
fn test_four_by_four_squares() {
    let square = TileSpec {
        name: "square".to_string(),
        base: vec![[0, 0], [1, 0], [0, 1], [1, 1]],
        allow_rotate: false,
        allow_reflect: false,
        count: Some(4),
    };

    match run(&request(4, 4, vec![], vec![square.clone()], first_only())) {
        SolveReply::Result { layout, .. } => {
            assert_eq!(layout.len(), 4);
            assert_exact_cover(4, 4, &[], &layout);
        }
        other => unreachable!("expected a result, got {other:?}"),
    }

    let mut req = request(4, 4, vec![], vec![square], balanced(100));
    req.unique_by_board_symmetry = true;
    match run(&req) {
        SolveReply::Result { found, .. } => assert_eq!(found, 1),
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Scenario: a zero-stock type is ignored and the 1x3 planks cover 6x4
#[test]
fn test_mixed_catalog_with_empty_stock() {
    let plank = TileSpec {
        name: "plank".to_string(),
        base: vec![[0, 0], [1, 0], [2, 0]],
        allow_rotate: true,
        allow_reflect: false,
        count: None,
    };
    let reply = run(&request(
        6,
        4,
        vec![],
        vec![plank, domino(Some(0))],
        first_only(),
    ));
    match reply {
        SolveReply::Result { layout, .. } => {
            assert_eq!(layout.len(), 8);
            assert!(layout.iter().all(|placement| placement.ti == 0));
            assert_exact_cover(6, 4, &[], &layout);
        }
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Scenario: a 3x1 strip cannot be covered by dominoes
#[test]
fn test_three_by_one_infeasible() {
    match run(&request(3, 1, vec![], vec![domino(None)], first_only())) {
        SolveReply::Infeasible { reasons } => {
            assert!(reasons.iter().any(|r| r.contains("not divisible by 2")));
        }
        other => unreachable!("expected infeasible, got {other:?}"),
    }
}

// Stock limits bound the number of placements per type
#[test]
fn test_stock_limits_respected() {
    let reply = run(&request(4, 2, vec![], vec![domino(Some(4))], first_only()));
    match reply {
        SolveReply::Result { layout, .. } => {
            assert!(layout.len() <= 4);
            assert_exact_cover(4, 2, &[], &layout);
        }
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Orientation flags restrict placements: no rotation means no vertical dominoes
#[test]
fn test_orientations_respect_flags() {
    let horizontal_only = TileSpec {
        name: "plank".to_string(),
        base: vec![[0, 0], [1, 0]],
        allow_rotate: false,
        allow_reflect: false,
        count: None,
    };
    match run(&request(4, 2, vec![], vec![horizontal_only], first_only())) {
        SolveReply::Result { layout, .. } => {
            for placement in &layout {
                assert_eq!(placement.cells[0][1], placement.cells[1][1]);
            }
            assert_exact_cover(4, 2, &[], &layout);
        }
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// A 3x2 board has three domino tilings, two up to its symmetries
#[test]
fn test_three_by_two_symmetry_dedup() {
    let mut req = request(3, 2, vec![], vec![domino(None)], balanced(100));
    match run(&req) {
        SolveReply::Result { found, .. } => assert_eq!(found, 3),
        other => unreachable!("expected a result, got {other:?}"),
    }

    req.unique_by_board_symmetry = true;
    match run(&req) {
        SolveReply::Result { found, .. } => assert_eq!(found, 2),
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Pre-flight passes but no layout exists: the tromino cannot fit at all
#[test]
fn test_search_exhaustion_reports_generic_reason() {
    let bent = TileSpec {
        name: "bent".to_string(),
        base: vec![[0, 0], [1, 0], [0, 1]],
        allow_rotate: true,
        allow_reflect: false,
        count: None,
    };
    match run(&request(3, 1, vec![], vec![bent], first_only())) {
        SolveReply::Infeasible { reasons } => {
            assert_eq!(reasons, vec!["no exact layout found".to_string()]);
        }
        other => unreachable!("expected infeasible, got {other:?}"),
    }
}

// The same seed reproduces the same layout; the cap caps retention
#[test]
fn test_seeded_solves_are_reproducible() {
    let req = request(6, 6, vec![], vec![domino(None)], first_only());
    let first = run(&req);
    let second = run(&req);
    match (first, second) {
        (SolveReply::Result { layout: a, .. }, SolveReply::Result { layout: b, .. }) => {
            assert_eq!(a, b);
        }
        other => unreachable!("expected two results, got {other:?}"),
    }
}

#[test]
fn test_balanced_cap_limits_retention() {
    let reply = run(&request(4, 4, vec![], vec![domino(None)], balanced(3)));
    match reply {
        SolveReply::Result { found, score, .. } => {
            assert_eq!(found, 3);
            assert!(score.is_some_and(|s| s >= 0.0));
        }
        other => unreachable!("expected a result, got {other:?}"),
    }
}

// Progress events carry strictly increasing node counts
#[test]
fn test_progress_monotonicity() {
    let req = request(6, 6, vec![], vec![domino(None)], balanced(100_000));
    let mut events: Vec<ProgressEvent> = Vec::new();
    let reply = solve(&req, &mut |event| events.push(event));

    assert!(matches!(reply, SolveReply::Result { .. }));
    assert!(
        !events.is_empty(),
        "exhaustive 6x6 enumeration should pass the progress interval"
    );
    for pair in events.windows(2) {
        assert!(pair[0].nodes < pair[1].nodes);
    }
}

// Pre-flight failures must not invoke the search at all
#[test]
fn test_infeasible_skips_search() {
    let req = request(3, 3, vec![], vec![domino(None)], balanced(100));
    let mut events = 0usize;
    let reply = solve(&req, &mut |_| events += 1);
    assert!(matches!(reply, SolveReply::Infeasible { .. }));
    assert_eq!(events, 0, "search ran despite a failed pre-flight");
}

// Malformed input is an error reply, never infeasibility
#[test]
fn test_invalid_hole_is_an_error() {
    let reply = run(&request(
        4,
        4,
        vec![[4, 0]],
        vec![domino(None)],
        first_only(),
    ));
    match reply {
        SolveReply::Error { message } => assert!(message.contains("hole")),
        other => unreachable!("expected an error, got {other:?}"),
    }
}
