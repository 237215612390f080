//! Solver constants and runtime configuration defaults

/// Decision nodes between progress events
pub const PROGRESS_NODE_INTERVAL: u64 = 5000;

/// Fallback cap on distinct layouts retained during enumeration
pub const DEFAULT_SOLUTION_CAP: usize = 200;

// Safety limit to prevent excessive placement-table allocation
/// Maximum allowed board dimension
pub const MAX_BOARD_DIMENSION: u32 = 1024;

/// Stabilizer added to the squared mean in the mix-variance term
pub const MIX_VARIANCE_EPSILON: f64 = 1e-9;

/// Penalty per cell of a seam run longer than one cell
pub const SEAM_RUN_WEIGHT: f64 = 0.2;

/// Penalty per 2x2 joint where at least three placements meet
pub const CROSS_JOINT_WEIGHT: f64 = 0.1;

/// Placements meeting at a 2x2 window for it to count as a cross joint
pub const CROSS_JOINT_THRESHOLD: usize = 3;
