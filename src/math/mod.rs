/// Integer and statistical helpers
pub mod arith;
