//! Layout analysis and aesthetic scoring
//!
//! Ranks completed layouts by tile mix, orientation balance, seam runs
//! and four-corner joint crosses. Lower scores are better.

/// Balance scoring terms and settings
pub mod balance;
