use std::time::Instant;

use thiserror::Error;

use super::decisions::{Decisions, Reason};
use super::policy::Policy;
use super::rule::{Literal, Rule};
use super::rule_set::RuleSet;
use super::watch_graph::WatchGraph;

/// How often (in loop iterations) the deadline is checked
const DEADLINE_CHECK_INTERVAL: u64 = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("deadline reached after {iterations} iterations")]
    Timeout { iterations: u64 },
}

/// Complete SAT search over a set of rules.
///
/// Unit propagation runs over a [`WatchGraph`]. Open variables are decided
/// in [`Policy`] order, each decision opening a new level. When a level
/// runs into a conflict it is undone and the opposite of its branch is
/// asserted one level lower, so the search is exhaustive: `solve` returns
/// false only when no assignment satisfies every rule.
#[derive(Debug, Default)]
pub struct Solver {
    rules: RuleSet,
    preferred: Vec<Literal>,
    model: Option<Decisions>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, returning its ID
    pub fn add_rule(&mut self, rule: Rule) -> u32 {
        self.model = None;
        self.rules.add(rule)
    }

    /// Try `literal` before anything else when branching
    pub fn prefer(&mut self, literal: Literal) {
        self.preferred.push(literal);
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Search for an assignment satisfying every rule.
    ///
    /// On success the assignment is kept and can be read with [`Solver::value`].
    pub fn solve(&mut self, deadline: Option<Instant>) -> Result<bool, SolveError> {
        let start = Instant::now();
        self.model = None;
        let outcome = self.run(deadline);

        match &outcome {
            Ok(Some(_)) => log::trace!("SAT: {} rules in {:?}", self.rules.len(), start.elapsed()),
            Ok(None) => log::trace!("UNSAT: {} rules in {:?}", self.rules.len(), start.elapsed()),
            Err(e) => log::debug!("SAT solving aborted: {}", e),
        }

        let model = outcome?;
        let satisfiable = model.is_some();
        self.model = model;
        Ok(satisfiable)
    }

    /// Truth value of a literal in the last model found
    pub fn value(&self, literal: Literal) -> Option<bool> {
        self.model.as_ref()?.value(literal)
    }

    pub fn model(&self) -> Option<&Decisions> {
        self.model.as_ref()
    }

    fn run(&self, deadline: Option<Instant>) -> Result<Option<Decisions>, SolveError> {
        let max_variable = self
            .rules
            .iter()
            .flat_map(|rule| rule.literals().iter().map(|l| l.unsigned_abs() as usize))
            .max()
            .unwrap_or(0);
        let mut decisions = Decisions::with_capacity(max_variable);

        // Assertions are fixed at level 0 before anything else
        for rule in self.rules.iter() {
            if rule.is_empty() {
                log::trace!("Rule {} is empty", rule.id());
                return Ok(None);
            }
            if rule.is_assertion() && !decisions.decide(rule.literals()[0], Reason::Rule(rule.id())) {
                log::trace!("Assertion {} contradicts an earlier one", rule);
                return Ok(None);
            }
        }

        let mut watches = WatchGraph::from_rules(&self.rules);
        let policy = Policy::new(&self.preferred, &self.rules);
        let mut propagate_index = 0;
        let mut iterations: u64 = 0;

        loop {
            iterations += 1;
            if iterations % DEADLINE_CHECK_INTERVAL == 1 {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        return Err(SolveError::Timeout { iterations });
                    }
                }
            }

            let mut conflict = None;
            while propagate_index < decisions.len() {
                let literal = decisions.queue()[propagate_index].0;
                propagate_index += 1;

                if let Some(rule_id) = watches.propagate(literal, &self.rules, &mut decisions) {
                    conflict = Some(rule_id);
                    break;
                }
            }

            if let Some(rule_id) = conflict {
                let Some(branch) = decisions.branch() else {
                    log::trace!("Conflict at level 0: rule {} is unsolvable", rule_id);
                    return Ok(None);
                };

                let level = decisions.level();
                decisions.revert_to_level(level - 1);
                propagate_index = decisions.len();
                decisions.decide(-branch, Reason::Flipped);
                continue;
            }

            match policy.select_next(&decisions) {
                Some(literal) => {
                    decisions.increment_level();
                    decisions.decide(literal, Reason::Branch);
                }
                None => return Ok(Some(decisions)),
            }
        }
    }
}
