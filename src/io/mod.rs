//! Input/output operations and error handling
//!
//! Problems arrive as JSON solve requests and leave as a stream of reply
//! messages; this module holds the wire types, the CLI front end, the
//! progress display and the crate's error type.

/// Command-line interface for batch-solving problem files
pub mod cli;
/// Solver constants and runtime configuration defaults
pub mod configuration;
/// Error types for solver operations
pub mod error;
/// Wire types for solve requests and replies
pub mod messages;
/// Progress display driven by search progress events
pub mod progress;
