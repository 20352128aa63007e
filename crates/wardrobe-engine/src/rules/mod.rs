//! Boolean rules over garments, colors and cloths.

mod compiler;
mod proposition;
mod variable;

pub use compiler::{Constraint, ConstraintCompiler, ConstraintKind};
pub use proposition::Proposition;
pub use variable::{Variable, VariableMap};
