//! Board symmetry transforms for layout canonicalization
//!
//! Squares start from the eight D4 transforms, other rectangles from the
//! Klein four-group. A transform survives only if it maps the hole set
//! onto itself exactly; the retained subgroup canonicalizes layouts.

use crate::algorithm::bitset::DenseBitset;
use crate::spatial::board::Board;

/// One rigid transform mapping the board rectangle onto itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTransform {
    /// Leave cells in place
    Identity,
    /// Quarter turn, squares only
    Rotate90,
    /// Half turn
    Rotate180,
    /// Three-quarter turn, squares only
    Rotate270,
    /// Mirror across the vertical axis
    FlipHorizontal,
    /// Mirror across the horizontal axis
    FlipVertical,
    /// Mirror across the main diagonal, squares only
    FlipMainDiagonal,
    /// Mirror across the anti-diagonal, squares only
    FlipAntiDiagonal,
}

/// D4 candidates for square boards
const SQUARE_CANDIDATES: [BoardTransform; 8] = [
    BoardTransform::Identity,
    BoardTransform::Rotate90,
    BoardTransform::Rotate180,
    BoardTransform::Rotate270,
    BoardTransform::FlipHorizontal,
    BoardTransform::FlipVertical,
    BoardTransform::FlipMainDiagonal,
    BoardTransform::FlipAntiDiagonal,
];

/// Klein four-group candidates for non-square rectangles
const RECT_CANDIDATES: [BoardTransform; 4] = [
    BoardTransform::Identity,
    BoardTransform::Rotate180,
    BoardTransform::FlipHorizontal,
    BoardTransform::FlipVertical,
];

impl BoardTransform {
    /// Map a cell through this transform on a `width` x `height` board
    pub const fn apply(self, cell: [i32; 2], width: i32, height: i32) -> [i32; 2] {
        let [x, y] = cell;
        match self {
            Self::Identity => [x, y],
            Self::Rotate90 => [width - 1 - y, x],
            Self::Rotate180 => [width - 1 - x, height - 1 - y],
            Self::Rotate270 => [y, height - 1 - x],
            Self::FlipHorizontal => [width - 1 - x, y],
            Self::FlipVertical => [x, height - 1 - y],
            Self::FlipMainDiagonal => [y, x],
            Self::FlipAntiDiagonal => [width - 1 - y, height - 1 - x],
        }
    }
}

/// The subgroup of candidate transforms preserving the free set
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    transforms: Vec<BoardTransform>,
}

impl SymmetryGroup {
    /// The trivial group, used when symmetry dedup is disabled
    pub fn identity() -> Self {
        Self {
            transforms: vec![BoardTransform::Identity],
        }
    }

    /// Retain the candidate transforms under which the hole set is
    /// invariant
    pub fn of_board(board: &Board) -> Self {
        let candidates: &[BoardTransform] = if board.is_square() {
            &SQUARE_CANDIDATES
        } else {
            &RECT_CANDIDATES
        };

        let transforms = candidates
            .iter()
            .copied()
            .filter(|&transform| Self::preserves_holes(board, transform))
            .collect();
        Self { transforms }
    }

    /// The retained transforms, identity always first
    pub fn transforms(&self) -> &[BoardTransform] {
        &self.transforms
    }

    fn preserves_holes(board: &Board, transform: BoardTransform) -> bool {
        let holes = board.holes();
        let mut mapped = DenseBitset::new(holes.len());
        for key in holes.iter_ones() {
            let x = key as i32 % board.width();
            let y = key as i32 / board.width();
            let [tx, ty] = transform.apply([x, y], board.width(), board.height());
            mapped.insert(board.cell_key(tx, ty) as usize);
        }
        mapped == *holes
    }
}
