//! Pre-flight infeasibility oracle
//!
//! Cheap necessary-condition tests that run before the search. Each
//! failing check contributes one human-readable reason; any reason at all
//! means the search must not run.

use crate::math::arith::gcd_all;
use crate::spatial::board::Board;
use crate::spatial::shape::TileType;

/// Run all pre-flight checks; an empty result means the search may run
pub fn preflight(board: &Board, tiles: &[TileType]) -> Vec<String> {
    let mut reasons = Vec::new();
    let free = board.free_count();

    let available: Vec<&TileType> = tiles.iter().filter(|tile| tile.is_available()).collect();
    if available.is_empty() {
        reasons.push("no tiles available: every type in the catalog has zero stock".to_string());
        return reasons;
    }

    // Total coverable area, only meaningful when every stock is finite.
    if available.iter().all(|tile| tile.count.is_some()) {
        let coverable: usize = available
            .iter()
            .map(|tile| tile.count.unwrap_or(0) * tile.area())
            .sum();
        if coverable < free {
            reasons.push(format!(
                "total tile stock covers at most {coverable} cells but the board has {free} free cells"
            ));
        }
    }

    // Parity of the free-cell count.
    if free % 2 == 1 && available.iter().all(|tile| tile.area() % 2 == 0) {
        reasons.push(format!(
            "the board has an odd number of unit cells ({free}) but all available tiles cover an even number of cells"
        ));
    }

    // Divisibility by the gcd of available tile areas.
    if let Some(divisor) = gcd_all(available.iter().map(|tile| tile.area())) {
        if divisor > 1 && free % divisor != 0 {
            reasons.push(format!(
                "the free cell count {free} is not divisible by {divisor}, the gcd of all available tile areas"
            ));
        }
    }

    // Checkerboard coloring.
    let imbalance = board.color_imbalance();
    if imbalance != 0 && available.iter().all(|tile| tile.is_parity_neutral()) {
        reasons.push(format!(
            "checkerboard imbalance: the free cells have {} more cells of one color than the other, but every available tile always covers both colors equally",
            imbalance.abs()
        ));
    }

    reasons
}
