//! Solve driver: request validation, pre-flight dispatch, search modes
//! and the dedup/scoring pipeline
//!
//! Every solve call builds all state afresh and returns exactly one
//! terminal reply. Validation and internal failures surface as the
//! `error` variant; ordinary infeasibility never does.

use crate::algorithm::canonical::canonical_key;
use crate::algorithm::placements::PlacementTable;
use crate::algorithm::preflight::preflight;
use crate::algorithm::search::{ExactCoverSearch, ProgressEvent, SolutionOutcome};
use crate::analysis::balance::{BalanceSettings, score_layout};
use crate::io::configuration::DEFAULT_SOLUTION_CAP;
use crate::io::error::{Result, internal_error, invalid_parameter};
use crate::io::messages::{BalanceRequest, PlacedTile, SolveReply, SolveRequest};
use crate::spatial::board::Board;
use crate::spatial::shape::TileType;
use crate::spatial::symmetry::SymmetryGroup;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashSet;

/// Reason reported when the search exhausts after a passing pre-flight
const NO_LAYOUT_REASON: &str = "no exact layout found";

/// Solve one request, streaming progress events to `progress`
///
/// Progress events arrive in strictly increasing node order and always
/// before the returned terminal reply.
pub fn solve(request: &SolveRequest, progress: &mut dyn FnMut(ProgressEvent)) -> SolveReply {
    match solve_inner(request, progress) {
        Ok(reply) => reply,
        Err(error) => SolveReply::Error {
            message: error.to_string(),
        },
    }
}

fn solve_inner(
    request: &SolveRequest,
    progress: &mut dyn FnMut(ProgressEvent),
) -> Result<SolveReply> {
    let board = Board::new(request.width, request.height, &request.holes)?;
    let tiles: Vec<TileType> = request.tile_types.iter().map(TileType::from).collect();
    for tile in &tiles {
        tile.validate()?;
    }

    let reasons = preflight(&board, &tiles);
    if !reasons.is_empty() {
        return Ok(SolveReply::Infeasible { reasons });
    }

    let table = PlacementTable::build(&board, &tiles)?;
    let rng = request
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    match &request.balance {
        BalanceRequest::FirstOnly { no_balance: true } => {
            Ok(first_only(&board, &tiles, &table, rng, progress))
        }
        BalanceRequest::FirstOnly { no_balance: false } => Err(invalid_parameter(
            "balance",
            &"noBalance=false",
            &"first-only mode requires noBalance to be true",
        )),
        BalanceRequest::Balanced {
            weights,
            desired_mix,
            max_solutions_to_evaluate,
        } => {
            let settings = BalanceSettings {
                weights: (*weights).into(),
                desired_mix: desired_mix.clone(),
                max_solutions_to_evaluate: max_solutions_to_evaluate
                    .or(request.cap)
                    .unwrap_or(DEFAULT_SOLUTION_CAP)
                    .max(1),
            };
            let group = if request.unique_by_board_symmetry {
                SymmetryGroup::of_board(&board)
            } else {
                SymmetryGroup::identity()
            };
            balanced(&board, &tiles, &table, &group, &settings, rng, progress)
        }
    }
}

/// First-only mode: stop at the first exact cover
fn first_only(
    board: &Board,
    tiles: &[TileType],
    table: &PlacementTable,
    rng: StdRng,
    progress: &mut dyn FnMut(ProgressEvent),
) -> SolveReply {
    let mut search = ExactCoverSearch::new(table, tiles, rng);
    let mut first: Option<Vec<u32>> = None;
    search.run(progress, &mut |rows| {
        first = Some(rows.to_vec());
        SolutionOutcome::Done
    });

    match first {
        Some(rows) => SolveReply::Result {
            found: 1,
            layout: materialize(&rows, table, board),
            score: None,
        },
        None => SolveReply::Infeasible {
            reasons: vec![NO_LAYOUT_REASON.to_string()],
        },
    }
}

/// Balanced mode: enumerate distinct canonical layouts, score, pick best
fn balanced(
    board: &Board,
    tiles: &[TileType],
    table: &PlacementTable,
    group: &SymmetryGroup,
    settings: &BalanceSettings,
    rng: StdRng,
    progress: &mut dyn FnMut(ProgressEvent),
) -> Result<SolveReply> {
    let cap = settings.max_solutions_to_evaluate;
    let mut search = ExactCoverSearch::new(table, tiles, rng);
    let mut seen: HashSet<Vec<u32>> = HashSet::new();
    let mut retained: Vec<Vec<u32>> = Vec::new();

    search.run(progress, &mut |rows| {
        let key = canonical_key(rows, table, board, group);
        if !seen.insert(key) {
            return SolutionOutcome::Discarded;
        }
        retained.push(rows.to_vec());
        if retained.len() >= cap {
            SolutionOutcome::Done
        } else {
            SolutionOutcome::Retained
        }
    });

    if retained.is_empty() {
        return Ok(SolveReply::Infeasible {
            reasons: vec![NO_LAYOUT_REASON.to_string()],
        });
    }

    let found = retained.len();
    let mut best: Option<(f64, Vec<PlacedTile>)> = None;
    for rows in retained {
        let layout = materialize(&rows, table, board);
        let score = score_layout(board, tiles, &layout, settings);
        if best.as_ref().map_or(true, |(current, _)| score < *current) {
            best = Some((score, layout));
        }
    }

    let Some((score, layout)) = best else {
        return Err(internal_error(
            "balanced selection",
            &"no layout survived scoring",
        ));
    };
    Ok(SolveReply::Result {
        found,
        layout,
        score: Some(score),
    })
}

/// Turn chosen rows back into board-coordinate placements
fn materialize(rows: &[u32], table: &PlacementTable, board: &Board) -> Vec<PlacedTile> {
    rows.iter()
        .map(|&row| {
            let placement = table.placement(row);
            PlacedTile {
                ti: placement.tile,
                cells: placement
                    .cols
                    .iter()
                    .filter_map(|&column| board.cell_coords(column as usize))
                    .collect(),
            }
        })
        .collect()
}
