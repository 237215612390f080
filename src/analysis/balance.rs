//! Balance scoring for completed layouts
//!
//! Four nonnegative terms measure how pleasant a layout looks: tile-mix
//! error, orientation imbalance, seam runs along rows and columns, and
//! four-corner joint crosses. The weighted sum ranks layouts; lower is
//! better, ties keep the earlier layout.

use crate::io::configuration::{
    CROSS_JOINT_THRESHOLD, CROSS_JOINT_WEIGHT, MIX_VARIANCE_EPSILON, SEAM_RUN_WEIGHT,
};
use crate::io::messages::PlacedTile;
use crate::math::arith::mean_variance;
use crate::spatial::board::Board;
use crate::spatial::shape::TileType;
use ndarray::Array2;
use std::collections::{HashMap, HashSet};

/// Term weights for the balance score
#[derive(Debug, Clone, Copy)]
pub struct BalanceWeights {
    /// Weight of the tile-mix error term
    pub tile_count_variance: f64,
    /// Weight of the orientation-imbalance term
    pub orientation_balance: f64,
    /// Weight of the seam-run term
    pub seam_penalty: f64,
    /// Weight of the cross-joint term
    pub cross_joints: f64,
}

/// Settings for the enumerate-and-score mode
#[derive(Debug, Clone)]
pub struct BalanceSettings {
    /// Term weights
    pub weights: BalanceWeights,
    /// Optional target mix of tile-type names
    pub desired_mix: Option<HashMap<String, f64>>,
    /// Cap on distinct canonical layouts retained during enumeration
    pub max_solutions_to_evaluate: usize,
}

/// Score one completed layout; lower is better
pub fn score_layout(
    board: &Board,
    tiles: &[TileType],
    layout: &[PlacedTile],
    settings: &BalanceSettings,
) -> f64 {
    let grid = index_grid(board, layout);
    let weights = &settings.weights;

    weights.tile_count_variance * mix_error(tiles, layout, settings.desired_mix.as_ref())
        + weights.orientation_balance * orientation_error(layout)
        + weights.seam_penalty * seam_penalty(&grid)
        + weights.cross_joints * cross_joints(&grid)
}

/// H x W grid of layout indices, -1 for holes
fn index_grid(board: &Board, layout: &[PlacedTile]) -> Array2<i32> {
    let mut grid = Array2::from_elem(
        (board.height() as usize, board.width() as usize),
        -1i32,
    );
    for (index, placement) in layout.iter().enumerate() {
        for &[x, y] in &placement.cells {
            if let Some(cell) = grid.get_mut([y as usize, x as usize]) {
                *cell = index as i32;
            }
        }
    }
    grid
}

/// Tile-mix error over per-name placement counts
///
/// Without a target mix this is the squared coefficient of variation of
/// the counts. With a target it is the squared L2 distance between
/// normalized actual and normalized target proportions; names absent
/// from either side weigh zero.
fn mix_error(
    tiles: &[TileType],
    layout: &[PlacedTile],
    desired_mix: Option<&HashMap<String, f64>>,
) -> f64 {
    let mut counts_by_name: HashMap<&str, f64> = HashMap::new();
    for placement in layout {
        if let Some(tile) = tiles.get(placement.ti) {
            *counts_by_name.entry(tile.name.as_str()).or_insert(0.0) += 1.0;
        }
    }

    match desired_mix {
        None => {
            let counts: Vec<f64> = counts_by_name.values().copied().collect();
            let (mean, variance) = mean_variance(&counts);
            variance / (mean * mean + MIX_VARIANCE_EPSILON)
        }
        Some(target) => {
            let total: f64 = counts_by_name.values().sum();
            let target_total: f64 = target.values().sum();

            let names: HashSet<&str> = counts_by_name
                .keys()
                .copied()
                .chain(target.keys().map(String::as_str))
                .collect();

            names
                .iter()
                .map(|name| {
                    let actual = if total > 0.0 {
                        counts_by_name.get(name).copied().unwrap_or(0.0) / total
                    } else {
                        0.0
                    };
                    let wanted = if target_total > 0.0 {
                        target.get(*name).copied().unwrap_or(0.0) / target_total
                    } else {
                        0.0
                    };
                    (actual - wanted).powi(2)
                })
                .sum()
        }
    }
}

/// Orientation imbalance from bounding-box classification
///
/// Wide placements count as horizontal, tall ones as vertical, squares as
/// neither. Zero when no placement leans either way.
fn orientation_error(layout: &[PlacedTile]) -> f64 {
    let mut horizontal = 0u32;
    let mut vertical = 0u32;

    for placement in layout {
        let min_x = placement.cells.iter().map(|c| c[0]).min().unwrap_or(0);
        let max_x = placement.cells.iter().map(|c| c[0]).max().unwrap_or(0);
        let min_y = placement.cells.iter().map(|c| c[1]).min().unwrap_or(0);
        let max_y = placement.cells.iter().map(|c| c[1]).max().unwrap_or(0);
        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        if width > height {
            horizontal += 1;
        } else if height > width {
            vertical += 1;
        }
    }

    let total = horizontal + vertical;
    if total == 0 {
        0.0
    } else {
        f64::from(horizontal.abs_diff(vertical)) / f64::from(total)
    }
}

/// Seam-run penalty along rows and columns
///
/// A run is a maximal chain of adjacent cells in which every consecutive
/// pair belongs to two different placements; holes break chains. Each run
/// longer than one cell costs [`SEAM_RUN_WEIGHT`] per cell.
fn seam_penalty(grid: &Array2<i32>) -> f64 {
    let (rows, cols) = grid.dim();
    let mut penalty = 0.0;

    let mut flush = |run: usize| {
        if run > 1 {
            penalty += SEAM_RUN_WEIGHT * run as f64;
        }
    };

    for y in 0..rows {
        let mut run = 1usize;
        for x in 1..cols {
            let previous = grid.get([y, x - 1]).copied().unwrap_or(-1);
            let current = grid.get([y, x]).copied().unwrap_or(-1);
            if previous >= 0 && current >= 0 && previous != current {
                run += 1;
            } else {
                flush(run);
                run = 1;
            }
        }
        flush(run);
    }

    for x in 0..cols {
        let mut run = 1usize;
        for y in 1..rows {
            let previous = grid.get([y - 1, x]).copied().unwrap_or(-1);
            let current = grid.get([y, x]).copied().unwrap_or(-1);
            if previous >= 0 && current >= 0 && previous != current {
                run += 1;
            } else {
                flush(run);
                run = 1;
            }
        }
        flush(run);
    }

    penalty
}

/// Cross-joint penalty over 2x2 windows
///
/// Counts hole-free windows where at least [`CROSS_JOINT_THRESHOLD`]
/// distinct placements meet, weighted by [`CROSS_JOINT_WEIGHT`].
fn cross_joints(grid: &Array2<i32>) -> f64 {
    let (rows, cols) = grid.dim();
    let mut crosses = 0usize;

    for y in 1..rows {
        for x in 1..cols {
            let window = [
                grid.get([y - 1, x - 1]).copied().unwrap_or(-1),
                grid.get([y - 1, x]).copied().unwrap_or(-1),
                grid.get([y, x - 1]).copied().unwrap_or(-1),
                grid.get([y, x]).copied().unwrap_or(-1),
            ];
            if window.iter().any(|&index| index < 0) {
                continue;
            }
            let mut distinct = window.to_vec();
            distinct.sort_unstable();
            distinct.dedup();
            if distinct.len() >= CROSS_JOINT_THRESHOLD {
                crosses += 1;
            }
        }
    }

    CROSS_JOINT_WEIGHT * crosses as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domino_type(name: &str) -> TileType {
        TileType {
            name: name.to_string(),
            base: vec![[0, 0], [1, 0]],
            allow_rotate: true,
            allow_reflect: false,
            count: None,
        }
    }

    fn unit_weights() -> BalanceWeights {
        BalanceWeights {
            tile_count_variance: 1.0,
            orientation_balance: 1.0,
            seam_penalty: 1.0,
            cross_joints: 1.0,
        }
    }

    fn settings(desired_mix: Option<HashMap<String, f64>>) -> BalanceSettings {
        BalanceSettings {
            weights: unit_weights(),
            desired_mix,
            max_solutions_to_evaluate: 16,
        }
    }

    // Two stacked horizontal dominoes on a 2x2 board: no mix error, full
    // orientation imbalance, two vertical seam runs of length two
    #[test]
    fn test_score_of_stacked_dominoes() {
        let board = Board::new(2, 2, &[]).unwrap();
        let tiles = [domino_type("plank")];
        let layout = [
            PlacedTile {
                ti: 0,
                cells: vec![[0, 0], [1, 0]],
            },
            PlacedTile {
                ti: 0,
                cells: vec![[0, 1], [1, 1]],
            },
        ];
        let score = score_layout(&board, &tiles, &layout, &settings(None));
        let expected = 1.0 + 2.0 * (SEAM_RUN_WEIGHT * 2.0);
        assert!((score - expected).abs() < 1e-9, "score was {score}");
    }

    // One horizontal and one vertical pair balance out the orientation term
    #[test]
    fn test_mixed_orientations_balance() {
        let layout = [
            PlacedTile {
                ti: 0,
                cells: vec![[0, 0], [1, 0]],
            },
            PlacedTile {
                ti: 0,
                cells: vec![[2, 0], [2, 1]],
            },
        ];
        assert!(orientation_error(&layout).abs() < 1e-12);
    }

    // A perfectly met desired mix scores zero on the mix term
    #[test]
    fn test_desired_mix_match() {
        let tiles = [domino_type("plank"), domino_type("board")];
        let layout = [
            PlacedTile {
                ti: 0,
                cells: vec![[0, 0], [1, 0]],
            },
            PlacedTile {
                ti: 1,
                cells: vec![[0, 1], [1, 1]],
            },
        ];
        let mix: HashMap<String, f64> =
            [("plank".to_string(), 1.0), ("board".to_string(), 1.0)].into();
        assert!(mix_error(&tiles, &layout, Some(&mix)).abs() < 1e-12);

        let skewed: HashMap<String, f64> =
            [("plank".to_string(), 1.0), ("board".to_string(), 0.0)].into();
        assert!(mix_error(&tiles, &layout, Some(&skewed)) > 0.0);
    }

    // A four-quadrant layout of 2x2 squares has one central cross joint
    #[test]
    fn test_cross_joint_detection() {
        let board = Board::new(4, 4, &[]).unwrap();
        let square = |ox: i32, oy: i32, ti: usize| PlacedTile {
            ti,
            cells: vec![[ox, oy], [ox + 1, oy], [ox, oy + 1], [ox + 1, oy + 1]],
        };
        let layout = [
            square(0, 0, 0),
            square(2, 0, 0),
            square(0, 2, 0),
            square(2, 2, 0),
        ];
        let grid = index_grid(&board, &layout);
        assert!((cross_joints(&grid) - CROSS_JOINT_WEIGHT).abs() < 1e-12);
    }

    // Holes break seam runs
    #[test]
    fn test_holes_break_seams() {
        let board = Board::new(3, 1, &[[1, 0]]).unwrap();
        let layout = [
            PlacedTile {
                ti: 0,
                cells: vec![[0, 0]],
            },
            PlacedTile {
                ti: 0,
                cells: vec![[2, 0]],
            },
        ];
        let grid = index_grid(&board, &layout);
        assert!(seam_penalty(&grid).abs() < 1e-12);
    }
}
