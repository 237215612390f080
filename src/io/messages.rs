//! Wire types for the solve request and its reply stream
//!
//! A solve call receives one request and produces zero or more progress
//! messages followed by exactly one terminal message: `result`,
//! `infeasible` or `error`.

use crate::analysis::balance::BalanceWeights;
use crate::spatial::shape::TileType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One solve request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Board width in cells
    #[serde(rename = "W")]
    pub width: u32,

    /// Board height in cells
    #[serde(rename = "H")]
    pub height: u32,

    /// Forbidden cells
    #[serde(default)]
    pub holes: Vec<[i32; 2]>,

    /// Tile catalog
    #[serde(rename = "tileTypes")]
    pub tile_types: Vec<TileSpec>,

    /// Deduplicate enumerated layouts by the board symmetry group
    #[serde(rename = "uniqueByBoardSymmetry", default)]
    pub unique_by_board_symmetry: bool,

    /// Balance mode configuration
    pub balance: BalanceRequest,

    /// Fallback solution cap when the balance config carries none
    #[serde(default)]
    pub cap: Option<usize>,

    /// PRNG seed for reproducible tie-breaking; host entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// One tile type in the request catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSpec {
    /// Identifier used for mix accounting
    pub name: String,
    /// Cell offsets defining the shape
    pub base: Vec<[i32; 2]>,
    /// Whether 90-degree rotations are enumerated
    #[serde(default)]
    pub allow_rotate: bool,
    /// Whether the mirror flip is also enumerated
    #[serde(default)]
    pub allow_reflect: bool,
    /// Stock limit; absent means unbounded
    #[serde(default)]
    pub count: Option<usize>,
}

impl From<&TileSpec> for TileType {
    fn from(spec: &TileSpec) -> Self {
        Self {
            name: spec.name.clone(),
            base: spec.base.clone(),
            allow_rotate: spec.allow_rotate,
            allow_reflect: spec.allow_reflect,
            count: spec.count,
        }
    }
}

/// Balance mode: return the first cover, or enumerate and score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceRequest {
    /// Return the first exact cover without scoring
    FirstOnly {
        /// Must be `true`; present to mirror the wire format
        #[serde(rename = "noBalance")]
        no_balance: bool,
    },
    /// Enumerate distinct covers and return the best-scoring one
    Balanced {
        /// Term weights for the balance score
        weights: WeightSpec,
        /// Optional target mix of tile-type names
        #[serde(rename = "desiredMix", default)]
        desired_mix: Option<HashMap<String, f64>>,
        /// Cap on distinct canonical layouts retained
        #[serde(rename = "maxSolutionsToEvaluate", default)]
        max_solutions_to_evaluate: Option<usize>,
    },
}

/// Term weights for the balance score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightSpec {
    /// Weight of the tile-mix error term
    pub tile_count_variance: f64,
    /// Weight of the orientation-imbalance term
    pub orientation_balance: f64,
    /// Weight of the seam-run term
    pub seam_penalty: f64,
    /// Weight of the cross-joint term
    pub cross_joints: f64,
}

impl From<WeightSpec> for BalanceWeights {
    fn from(spec: WeightSpec) -> Self {
        Self {
            tile_count_variance: spec.tile_count_variance,
            orientation_balance: spec.orientation_balance,
            seam_penalty: spec.seam_penalty,
            cross_joints: spec.cross_joints,
        }
    }
}

/// A placed tile in a result layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Catalog index of the tile type
    pub ti: usize,
    /// Covered board cells
    pub cells: Vec<[i32; 2]>,
}

/// Reply stream messages; exactly one terminal variant per solve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SolveReply {
    /// Periodic progress snapshot, emitted before the terminal message
    Progress {
        /// Decision nodes visited so far
        nodes: u64,
        /// Layouts retained so far
        found: usize,
    },
    /// Pre-flight failure or exhausted search
    Infeasible {
        /// One human-readable reason per failed check
        reasons: Vec<String>,
    },
    /// A layout was found
    Result {
        /// Distinct layouts retained during the search
        found: usize,
        /// The selected layout
        layout: Vec<PlacedTile>,
        /// Balance score; absent in first-only mode
        score: Option<f64>,
    },
    /// Unexpected internal failure, never ordinary infeasibility
    Error {
        /// Description of the failure
        message: String,
    },
}
