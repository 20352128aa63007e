use std::fmt;

use super::proposition::Proposition;
use super::variable::Variable;
use crate::catalog::{Catalog, ConstraintSpec, EntityKind};
use crate::error::Warning;

/// Kinds of declared constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// The entities of a group must not all be worn together
    Not,
    /// Wearing the first entity of a pair requires wearing the second
    Implies,
}

impl ConstraintKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "not" => Some(ConstraintKind::Not),
            "implies" => Some(ConstraintKind::Implies),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Not => "not",
            ConstraintKind::Implies => "implies",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated constraint whose operands are all resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub scope: EntityKind,
    pub groups: Vec<Vec<Variable>>,
}

impl Constraint {
    /// One proposition per operand group
    pub fn propositions(&self) -> Vec<Proposition> {
        self.groups
            .iter()
            .map(|group| match self.kind {
                ConstraintKind::Not => Proposition::not(Proposition::and(
                    group.iter().copied().map(Proposition::var).collect(),
                )),
                ConstraintKind::Implies => {
                    Proposition::implies(Proposition::var(group[0]), Proposition::var(group[1]))
                }
            })
            .collect()
    }
}

/// Turns declared constraints into propositions over a catalog's variables.
///
/// Malformed input never aborts compilation: an unknown `type` or `object`
/// drops the whole constraint, an unresolvable name or a badly sized group
/// drops only that group. Each case leaves a [`Warning`].
pub struct ConstraintCompiler<'a> {
    catalog: &'a Catalog,
    warnings: Vec<Warning>,
}

impl<'a> ConstraintCompiler<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            warnings: Vec::new(),
        }
    }

    /// Compile every constraint definition, in order.
    pub fn compile(&mut self, specs: &[ConstraintSpec]) -> Vec<Proposition> {
        let mut rules = Vec::new();
        for spec in specs {
            if let Some(constraint) = self.resolve(spec) {
                rules.extend(constraint.propositions());
            }
        }
        rules
    }

    /// Validate one constraint definition and resolve the names of each group.
    pub fn resolve(&mut self, spec: &ConstraintSpec) -> Option<Constraint> {
        let Some(kind) = ConstraintKind::from_str(&spec.kind) else {
            self.warn(Warning::UnknownConstraintType(spec.kind.clone()));
            return None;
        };
        let Some(scope) = EntityKind::from_str(&spec.object) else {
            self.warn(Warning::UnknownConstraintObject(spec.object.clone()));
            return None;
        };

        let groups = spec
            .values
            .iter()
            .filter_map(|group| self.resolve_group(kind, scope, group))
            .collect();

        Some(Constraint { kind, scope, groups })
    }

    fn resolve_group(&mut self, kind: ConstraintKind, scope: EntityKind, group: &[String]) -> Option<Vec<Variable>> {
        if group.is_empty() {
            self.warn(Warning::EmptyGroup { kind, scope });
            return None;
        }

        let mut variables = Vec::with_capacity(group.len());
        for name in group {
            match self.catalog.resolve(scope, name) {
                Some(entity) => variables.push(entity.variable()),
                None => {
                    self.warn(Warning::UnresolvedOperand {
                        kind,
                        scope,
                        name: name.clone(),
                    });
                    return None;
                }
            }
        }

        if kind == ConstraintKind::Implies && variables.len() != 2 {
            self.warn(Warning::ImpliesArity {
                scope,
                group: group.to_vec(),
            });
            return None;
        }

        Some(variables)
    }

    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning.emit());
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
