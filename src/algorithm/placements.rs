//! Placement enumeration and the exact-cover matrix
//!
//! Every way of laying one tile orientation at one board offset becomes a
//! row of the matrix; free cells are its columns. Rows carry ascending
//! column indices, and a reverse index maps each column to the rows
//! touching it.

use crate::io::error::{Result, internal_error};
use crate::spatial::board::Board;
use crate::spatial::shape::{TileType, orientations};

/// One concrete placement: a row of the exact-cover matrix
#[derive(Debug, Clone)]
pub struct Placement {
    /// Catalog index of the tile type
    pub tile: usize,
    /// Covered columns in ascending row-major order
    pub cols: Vec<u32>,
}

/// All placements for a problem plus the column-to-rows reverse index
#[derive(Debug)]
pub struct PlacementTable {
    placements: Vec<Placement>,
    rows_by_col: Vec<Vec<u32>>,
}

impl PlacementTable {
    /// Enumerate every placement of every tile orientation on the board
    ///
    /// Types with zero stock contribute no rows. Placement ids grow
    /// monotonically in (tile, orientation, offset) order.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a cell that passed the free-set test
    /// has no column index; that would mean the board index is corrupt.
    pub fn build(board: &Board, tiles: &[TileType]) -> Result<Self> {
        let mut placements = Vec::new();
        let mut rows_by_col = vec![Vec::new(); board.free_count()];

        for (tile_index, tile) in tiles.iter().enumerate() {
            if !tile.is_available() {
                continue;
            }

            for orientation in orientations(tile) {
                let [max_x, max_y] = orientation.max;
                if max_x >= board.width() || max_y >= board.height() {
                    continue;
                }

                for offset_y in 0..=(board.height() - 1 - max_y) {
                    'offsets: for offset_x in 0..=(board.width() - 1 - max_x) {
                        let mut cols = Vec::with_capacity(orientation.cells.len());
                        for &[cell_x, cell_y] in &orientation.cells {
                            let x = offset_x + cell_x;
                            let y = offset_y + cell_y;
                            if !board.is_free(x, y) {
                                continue 'offsets;
                            }
                            let Some(column) = board.column_of(x, y) else {
                                return Err(internal_error(
                                    "placement enumeration",
                                    &format!("free cell ({x},{y}) has no column index"),
                                ));
                            };
                            cols.push(column as u32);
                        }

                        let pid = placements.len() as u32;
                        for &column in &cols {
                            if let Some(rows) = rows_by_col.get_mut(column as usize) {
                                rows.push(pid);
                            }
                        }
                        placements.push(Placement {
                            tile: tile_index,
                            cols,
                        });
                    }
                }
            }
        }

        Ok(Self {
            placements,
            rows_by_col,
        })
    }

    /// Number of rows in the matrix
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the matrix has no rows at all
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of columns in the matrix, the board's free-cell count
    pub fn column_count(&self) -> usize {
        self.rows_by_col.len()
    }

    /// The placement behind a row id
    pub fn placement(&self, row: u32) -> &Placement {
        &self.placements[row as usize]
    }

    /// All rows incident to a column
    pub fn rows_by_col(&self, column: usize) -> &[u32] {
        self.rows_by_col
            .get(column)
            .map_or(&[], |rows| rows.as_slice())
    }

    /// All placements in id order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}
