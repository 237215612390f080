//! Layout canonicalization under the board symmetry group
//!
//! A completed layout is serialized once per retained transform as a
//! packed integer sequence; the lexicographically smallest serialization
//! is the canonical key. Two layouts related by a retained transform
//! share a key, so a set of keys deduplicates enumerated solutions.

use crate::algorithm::placements::PlacementTable;
use crate::spatial::board::Board;
use crate::spatial::symmetry::SymmetryGroup;

/// Canonical dedup key for one completed layout
///
/// Per transform: every placement's cells are mapped and re-sorted
/// (packed keys sort as `(y, x)`), placements are sorted by cell sequence
/// with the tile index as final tiebreaker, and the list is flattened to
/// length-prefixed cell runs. The minimum over the group is returned.
pub fn canonical_key(
    rows: &[u32],
    table: &PlacementTable,
    board: &Board,
    group: &SymmetryGroup,
) -> Vec<u32> {
    let mut best: Option<Vec<u32>> = None;

    for &transform in group.transforms() {
        let mut mapped: Vec<(Vec<u32>, u32)> = rows
            .iter()
            .map(|&row| {
                let placement = table.placement(row);
                let mut cells: Vec<u32> = placement
                    .cols
                    .iter()
                    .map(|&column| {
                        let [x, y] = board.cell_coords(column as usize).unwrap_or([0, 0]);
                        let [tx, ty] = transform.apply([x, y], board.width(), board.height());
                        board.cell_key(tx, ty)
                    })
                    .collect();
                cells.sort_unstable();
                (cells, placement.tile as u32)
            })
            .collect();
        mapped.sort_unstable();

        let mut key = Vec::with_capacity(mapped.iter().map(|(cells, _)| cells.len() + 2).sum());
        for (cells, tile) in &mapped {
            key.push(cells.len() as u32);
            key.extend_from_slice(cells);
            key.push(*tile);
        }

        if best.as_ref().map_or(true, |current| key < *current) {
            best = Some(key);
        }
    }

    best.unwrap_or_default()
}
