use std::collections::BTreeSet;

use super::decisions::Decisions;
use super::rule::Literal;
use super::rule_set::RuleSet;

/// Order in which the solver branches on open variables.
///
/// Preferred literals are tried first, in the order they were given.
/// Every other variable that occurs in a rule is then tried false,
/// lowest variable first. Variables no rule mentions are never decided.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    order: Vec<Literal>,
}

impl Policy {
    pub fn new(preferred: &[Literal], rules: &RuleSet) -> Self {
        let mut seen = BTreeSet::new();
        let mut order = Vec::new();

        for &literal in preferred {
            if seen.insert(literal.unsigned_abs()) {
                order.push(literal);
            }
        }

        let occurring: BTreeSet<u32> = rules
            .iter()
            .flat_map(|rule| rule.literals().iter().map(|l| l.unsigned_abs()))
            .collect();

        for variable in occurring {
            if seen.insert(variable) {
                order.push(-(variable as Literal));
            }
        }

        Self { order }
    }

    /// Next literal to branch on, None once every variable is decided
    pub fn select_next(&self, decisions: &Decisions) -> Option<Literal> {
        self.order
            .iter()
            .copied()
            .find(|l| decisions.undecided(l.unsigned_abs()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
