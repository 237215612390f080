/// Dense bitset implementation for covered-column and banned-row tracking
pub mod bitset;
/// Layout canonicalization under the board symmetry group
pub mod canonical;
/// Solve driver: mode dispatch, dedup and scoring pipeline
pub mod executor;
/// Placement enumeration and the exact-cover matrix
pub mod placements;
/// Pre-flight infeasibility oracle
pub mod preflight;
/// Exact-cover search engine with MRV branching
pub mod search;
