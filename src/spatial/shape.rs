//! Tile shapes, normalization and orientation generation
//!
//! A shape is a set of integer cell offsets. Orientations are derived by
//! 90-degree rotations and optional reflection, normalized to the origin
//! and deduplicated, so symmetric shapes never produce redundant
//! placements.

use crate::io::error::{Result, SolverError};
use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

/// One tile type from the catalog
#[derive(Debug, Clone)]
pub struct TileType {
    /// Identifier used for mix accounting
    pub name: String,
    /// Cell offsets defining the shape in some canonical position
    pub base: Vec<[i32; 2]>,
    /// Whether 90-degree rotations are distinct orientations to enumerate
    pub allow_rotate: bool,
    /// Whether a mirror flip is also enumerated
    pub allow_reflect: bool,
    /// Stock limit; `None` denotes unbounded stock
    pub count: Option<usize>,
}

impl TileType {
    /// Validate the shape definition
    ///
    /// # Errors
    ///
    /// Returns an error if the base is empty or contains duplicate cells.
    pub fn validate(&self) -> Result<()> {
        if self.base.is_empty() {
            return Err(SolverError::InvalidTile {
                name: self.name.clone(),
                reason: "shape has no cells".to_string(),
            });
        }
        let distinct: HashSet<[i32; 2]> = self.base.iter().copied().collect();
        if distinct.len() != self.base.len() {
            return Err(SolverError::InvalidTile {
                name: self.name.clone(),
                reason: "shape repeats a cell".to_string(),
            });
        }
        Ok(())
    }

    /// Number of cells the tile covers
    pub fn area(&self) -> usize {
        self.base.len()
    }

    /// Whether any stock remains to draw from
    pub fn is_available(&self) -> bool {
        self.count != Some(0)
    }

    /// Whether every enumerable orientation covers both checkerboard
    /// colors equally
    ///
    /// For rectangles this coincides with having at least one even side.
    pub fn is_parity_neutral(&self) -> bool {
        orientations(self)
            .iter()
            .all(|orientation| orientation.color_imbalance() == 0)
    }
}

/// A normalized orientation of a tile shape
#[derive(Debug, Clone)]
pub struct Orientation {
    /// Cells translated so min-x and min-y are zero, sorted by `(y, x)`
    pub cells: Vec<[i32; 2]>,
    /// Maximum x and y offsets, bounding the valid placement range
    pub max: [i32; 2],
}

impl Orientation {
    fn from_normalized(cells: Vec<[i32; 2]>) -> Self {
        let max_x = cells.iter().map(|c| c[0]).max().unwrap_or(0);
        let max_y = cells.iter().map(|c| c[1]).max().unwrap_or(0);
        Self {
            cells,
            max: [max_x, max_y],
        }
    }

    /// Checkerboard imbalance of the cells, color by `(x + y) mod 2`
    pub fn color_imbalance(&self) -> i64 {
        self.cells
            .iter()
            .map(|&[x, y]| if (x + y) % 2 == 0 { 1 } else { -1 })
            .sum()
    }
}

/// Translate cells so the minimum x and y are zero, sorted by `(y, x)`
pub fn normalize(cells: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let min_x = cells.iter().map(|c| c[0]).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c[1]).min().unwrap_or(0);
    let mut normalized: Vec<[i32; 2]> = cells
        .iter()
        .map(|&[x, y]| [x - min_x, y - min_y])
        .collect();
    normalized.sort_unstable_by_key(|&[x, y]| (y, x));
    normalized
}

/// Rotate cells a quarter turn: `(x, y)` to `(-y, x)`
pub fn rotate90(cells: &[[i32; 2]]) -> Vec<[i32; 2]> {
    cells.iter().map(|&[x, y]| [-y, x]).collect()
}

/// Mirror cells across the vertical axis: `(x, y)` to `(-x, y)`
pub fn reflect(cells: &[[i32; 2]]) -> Vec<[i32; 2]> {
    cells.iter().map(|&[x, y]| [-x, y]).collect()
}

/// Hash of a normalized cell sequence, the orientation dedup key
fn orientation_key(cells: &[[i32; 2]]) -> u64 {
    let mut hasher = DefaultHasher::new();
    cells.hash(&mut hasher);
    hasher.finish()
}

/// All distinct orientations of a tile type
///
/// Starts with the base, adds three further quarter turns when rotation
/// is allowed, adds the reflection of every candidate when reflection is
/// allowed, then normalizes and deduplicates. The result is independent
/// of the base's offset and insensitive to cell permutation.
pub fn orientations(tile: &TileType) -> Vec<Orientation> {
    let mut candidates = vec![tile.base.clone()];

    if tile.allow_rotate {
        for _ in 0..3 {
            let previous = candidates.last().cloned().unwrap_or_default();
            candidates.push(rotate90(&previous));
        }
    }

    if tile.allow_reflect {
        let unreflected = candidates.len();
        for i in 0..unreflected {
            if let Some(candidate) = candidates.get(i) {
                let mirrored = reflect(candidate);
                candidates.push(mirrored);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for candidate in candidates {
        let normalized = normalize(&candidate);
        if seen.insert(orientation_key(&normalized)) {
            distinct.push(Orientation::from_normalized(normalized));
        }
    }
    distinct
}
