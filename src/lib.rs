//! Exact-cover tiling planner for rectangular boards with holes
//!
//! Given a board, a catalog of tile shapes with optional rotation and
//! reflection and per-type stock limits, the solver either proves
//! infeasibility cheaply, returns the first exact cover, or enumerates
//! distinct covers and picks the one with the best aesthetic balance.

#![forbid(unsafe_code)]

/// Core search implementation including placement enumeration, the pre-flight
/// oracle, the exact-cover engine and layout canonicalization
pub mod algorithm;
/// Balance scoring for completed layouts
pub mod analysis;
/// Input/output operations, wire messages and error handling
pub mod io;
/// Arithmetic utilities shared by the oracle and the scorer
pub mod math;
/// Board geometry, tile shapes and board symmetries
pub mod spatial;

pub use io::error::{Result, SolverError};
