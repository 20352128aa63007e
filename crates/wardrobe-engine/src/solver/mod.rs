//! SAT backend used to check candidate dressings.
//!
//! Propositions are lowered to clauses ([`Rule`]s) over integer literals and
//! handed to a small, complete DPLL solver.
//!
//! # Architecture
//!
//! - [`Rule`]: a clause, tagged with the [`RuleType`] that produced it
//! - [`RuleSet`]: deduplicated collection of rules with sequential IDs
//! - [`Decisions`]: the assignment trail, split into decision levels
//! - [`WatchGraph`]: two-watched-literal index used for unit propagation
//! - [`Policy`]: branching order (preferred literals, then everything false)
//! - [`Solver`]: the search loop
//!
//! # Algorithm Overview
//!
//! 1. **Assertions**: single-literal rules are fixed at level 0
//! 2. **Unit Propagation**: rules with one open literal force it
//! 3. **Decision Making**: pick the next open literal from the policy
//! 4. **Backtracking**: on conflict, undo the level and assert the opposite
//!    of its branch one level lower
//!
//! # Example
//!
//! ```
//! use wardrobe_engine::solver::{Rule, RuleType, Solver};
//!
//! let mut solver = Solver::new();
//! solver.add_rule(Rule::new(vec![1, 2], RuleType::Constraint));
//! solver.add_rule(Rule::assertion(-1, RuleType::Absent));
//!
//! assert_eq!(solver.solve(None), Ok(true));
//! assert_eq!(solver.value(2), Some(true));
//! ```

mod decisions;
mod policy;
mod rule;
mod rule_set;
mod solver;
mod watch_graph;


pub use decisions::{Decisions, Reason};
pub use policy::Policy;
pub use rule::{Literal, Rule, RuleType};
pub use rule_set::RuleSet;
pub use solver::{SolveError, Solver};
pub use watch_graph::WatchGraph;
