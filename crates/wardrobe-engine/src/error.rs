use std::time::Duration;

use thiserror::Error;

use crate::catalog::EntityKind;
use crate::rules::ConstraintKind;

/// Fatal errors. Anything reported here leaves no usable engine behind.
#[derive(Error, Debug)]
pub enum WardrobeError {
    // Definition errors
    #[error("Wardrobe definition {source_name} is missing or invalid: {reason}")]
    MissingDefinition { source_name: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WardrobeError {
    pub(crate) fn missing_definition(source_name: impl Into<String>, reason: impl ToString) -> Self {
        WardrobeError::MissingDefinition {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WardrobeError>;

/// Recoverable conditions. The offending unit is skipped and processing of
/// its siblings continues; every warning is logged and kept for the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    // Catalog
    #[error("{kind} \"{dropped}\" normalizes to the same key as \"{kept}\", lookups resolve to \"{kept}\"")]
    AmbiguousName {
        kind: EntityKind,
        kept: String,
        dropped: String,
    },

    // Constraints
    #[error("Constraint \"{0}\" is not defined, skipping")]
    UnknownConstraintType(String),

    #[error("Object \"{0}\" could not be recognized, skipping")]
    UnknownConstraintObject(String),

    #[error("Constraint \"{kind}\" for object \"{scope}\" has unrecognized value \"{name}\", skipping group")]
    UnresolvedOperand {
        kind: ConstraintKind,
        scope: EntityKind,
        name: String,
    },

    #[error("Value {group:?} is not of length 2 for constraint \"implies\" for object \"{scope}\", skipping group")]
    ImpliesArity { scope: EntityKind, group: Vec<String> },

    #[error("Constraint \"{kind}\" for object \"{scope}\" has an empty value group, skipping group")]
    EmptyGroup { kind: ConstraintKind, scope: EntityKind },

    // Inventory
    #[error("Garment \"{0}\" is not available in the wardrobe")]
    UnknownGarment(String),

    #[error("Color \"{0}\" is not available in the wardrobe")]
    UnknownColor(String),

    #[error("Garment \"{garment}\" with color \"{color}\" was already added")]
    DuplicatePair { garment: String, color: String },

    // Validation
    #[error("Solver gave up on [{candidate}] after {}ms, candidate rejected", .timeout.as_millis())]
    SolverTimeout { candidate: String, timeout: Duration },
}

/// Log target of every [`Warning`], so front ends that print the collected
/// warnings themselves can filter the log copies out.
pub const WARNING_TARGET: &str = "wardrobe_engine::warning";

impl Warning {
    /// Log the warning and hand it back, so call sites can record it in one go.
    pub(crate) fn emit(self) -> Self {
        log::warn!(target: WARNING_TARGET, "{}", self);
        self
    }
}
