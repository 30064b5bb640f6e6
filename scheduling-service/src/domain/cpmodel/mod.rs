//! The constraint-model layer: a thin, solver-specific translation of the
//! domain rules into `selen` variables and constraints. Nothing outside this
//! module imports `selen` directly.

pub mod linear;
pub mod variables;

pub use variables::{build_variables, DecisionVariables};
