use super::decisions::{Decisions, Reason};
use super::rule::{Literal, Rule};
use super::rule_set::RuleSet;

/// Two-watched literals graph for efficient unit propagation.
///
/// Each non-assertion rule watches exactly 2 of its literals. When a
/// watched literal becomes false, we try to find another literal to
/// watch. Only when none is left does the rule force its other watch.
///
/// The watched pair of every rule is stored once, indexed by rule ID,
/// so moving one watch never leaves the other side pointing at a stale
/// literal.
#[derive(Debug, Default)]
pub struct WatchGraph {
    /// Literal index -> IDs of the rules watching that literal
    watches: Vec<Vec<u32>>,

    /// Rule ID -> currently watched pair, `[0, 0]` when unwatched
    watched: Vec<[Literal; 2]>,
}

impl WatchGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert literal to index (handles positive and negative literals)
    fn literal_to_index(literal: Literal) -> usize {
        let abs = literal.unsigned_abs() as usize;
        if literal > 0 {
            abs * 2
        } else {
            abs * 2 + 1
        }
    }

    /// Get mutable reference to watches for a literal, resizing if needed
    fn watches_mut(&mut self, literal: Literal) -> &mut Vec<u32> {
        let idx = Self::literal_to_index(literal);
        if idx >= self.watches.len() {
            self.watches.resize(idx + 1, Vec::new());
        }
        &mut self.watches[idx]
    }

    /// Build the watch graph from a rule set
    pub fn from_rules(rules: &RuleSet) -> Self {
        let mut graph = Self::new();
        graph.watched.resize(rules.len(), [0, 0]);

        for rule in rules.iter() {
            // Tautologies can never force anything
            if rule.len() < 2 || rule.is_tautology() {
                continue;
            }
            graph.add_rule(rule);
        }

        graph
    }

    /// Add a rule to the watch graph
    pub fn add_rule(&mut self, rule: &Rule) {
        let literals = rule.literals();
        if literals.len() < 2 {
            return; // Assertions don't need watches
        }

        let rule_id = rule.id();
        let slot = rule_id as usize;
        if slot >= self.watched.len() {
            self.watched.resize(slot + 1, [0, 0]);
        }

        self.watched[slot] = [literals[0], literals[1]];
        self.watches_mut(literals[0]).push(rule_id);
        self.watches_mut(literals[1]).push(rule_id);
    }

    /// Get rules watching a specific literal
    pub fn watching(&self, literal: Literal) -> &[u32] {
        let idx = Self::literal_to_index(literal);
        self.watches.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The pair a rule currently watches
    pub fn watched_pair(&self, rule_id: u32) -> Option<[Literal; 2]> {
        self.watched
            .get(rule_id as usize)
            .copied()
            .filter(|pair| pair[0] != 0)
    }

    /// Visit the rules affected by `decided` becoming true.
    ///
    /// Rules that still have an unfalsified literal move their watch
    /// there, rules left with a single open literal force it. Returns the
    /// ID of the first rule whose literals are all false.
    pub fn propagate(
        &mut self,
        decided: Literal,
        rules: &RuleSet,
        decisions: &mut Decisions,
    ) -> Option<u32> {
        let falsified = -decided;
        let idx = Self::literal_to_index(falsified);
        let Some(list) = self.watches.get_mut(idx) else {
            return None;
        };

        let watching = std::mem::take(list);
        let mut kept = Vec::with_capacity(watching.len());
        let mut conflict = None;
        let mut pending = watching.into_iter();

        while let Some(rule_id) = pending.next() {
            let Some(rule) = rules.get(rule_id) else {
                continue;
            };

            let pair = self.watched[rule_id as usize];
            let other = if pair[0] == falsified { pair[1] } else { pair[0] };

            if decisions.satisfied(other) {
                kept.push(rule_id);
                continue;
            }

            let replacement = rule
                .literals()
                .iter()
                .copied()
                .find(|&l| l != pair[0] && l != pair[1] && !decisions.conflict(l));

            if let Some(replacement) = replacement {
                self.watched[rule_id as usize] = [other, replacement];
                self.watches_mut(replacement).push(rule_id);
                continue;
            }

            kept.push(rule_id);
            if !decisions.decide(other, Reason::Rule(rule_id)) {
                conflict = Some(rule_id);
                kept.extend(pending);
                break;
            }
        }

        self.watches[idx] = kept;
        conflict
    }
}
