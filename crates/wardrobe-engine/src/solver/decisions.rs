use super::rule::Literal;

/// Why a literal was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Chosen by the search, opens a new level
    Branch,
    /// The opposite of a branch whose subtree failed
    Flipped,
    /// Forced by the rule with this ID
    Rule(u32),
}

/// Tracks decisions made during SAT solving.
///
/// Uses a flat Vec indexed by variable for O(1) lookups.
/// The decision_map stores: 0 = undecided, >0 = true at level N-1, <0 = false at level N-1
#[derive(Debug, Clone, Default)]
pub struct Decisions {
    decision_map: Vec<i32>,

    /// Queue of decisions in order made
    decision_queue: Vec<(Literal, Reason)>,

    /// Queue index where each level above 0 starts
    level_starts: Vec<usize>,
}

impl Decisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new decisions tracker with pre-allocated capacity
    pub fn with_capacity(max_variable: usize) -> Self {
        Self {
            decision_map: vec![0; max_variable + 1],
            decision_queue: Vec::with_capacity(max_variable),
            level_starts: Vec::new(),
        }
    }

    #[inline]
    fn ensure_capacity(&mut self, variable: usize) {
        if variable >= self.decision_map.len() {
            self.decision_map.resize(variable + 1, 0);
        }
    }

    #[inline]
    fn raw(&self, literal: Literal) -> i32 {
        self.decision_map
            .get(literal.unsigned_abs() as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Get the current decision level
    #[inline]
    pub fn level(&self) -> u32 {
        self.level_starts.len() as u32
    }

    /// Open a new decision level
    pub fn increment_level(&mut self) {
        self.level_starts.push(self.decision_queue.len());
    }

    /// Make a decision at the current level
    ///
    /// Returns false if this conflicts with an existing decision
    pub fn decide(&mut self, literal: Literal, reason: Reason) -> bool {
        let variable = literal.unsigned_abs() as usize;
        self.ensure_capacity(variable);

        let existing = self.decision_map[variable];
        if existing != 0 {
            return (existing > 0) == (literal > 0);
        }

        // Store level+1 so that level 0 doesn't become 0 (which means undecided)
        let level_value = (self.level() + 1) as i32;
        self.decision_map[variable] = if literal > 0 { level_value } else { -level_value };
        self.decision_queue.push((literal, reason));

        true
    }

    /// Check if a literal is satisfied by current decisions
    #[inline]
    pub fn satisfied(&self, literal: Literal) -> bool {
        let decision = self.raw(literal);
        decision != 0 && (decision > 0) == (literal > 0)
    }

    /// Check if a literal conflicts with current decisions
    #[inline]
    pub fn conflict(&self, literal: Literal) -> bool {
        let decision = self.raw(literal);
        decision != 0 && (decision > 0) != (literal > 0)
    }

    /// Truth value of a literal, None while undecided
    #[inline]
    pub fn value(&self, literal: Literal) -> Option<bool> {
        match self.raw(literal) {
            0 => None,
            decision => Some((decision > 0) == (literal > 0)),
        }
    }

    #[inline]
    pub fn decided(&self, variable: u32) -> bool {
        self.raw(variable as Literal) != 0
    }

    #[inline]
    pub fn undecided(&self, variable: u32) -> bool {
        !self.decided(variable)
    }

    /// Get the decision level for a literal's variable
    #[inline]
    pub fn decision_level(&self, literal: Literal) -> Option<u32> {
        match self.raw(literal) {
            0 => None,
            decision => Some(decision.unsigned_abs() - 1),
        }
    }

    /// The branch literal that opened the current level
    pub fn branch(&self) -> Option<Literal> {
        let start = *self.level_starts.last()?;
        self.decision_queue.get(start).map(|&(literal, _)| literal)
    }

    /// Revert all decisions at levels > target_level
    pub fn revert_to_level(&mut self, target_level: u32) {
        let target_level = target_level as usize;
        if target_level >= self.level_starts.len() {
            return;
        }

        let cut = self.level_starts[target_level];
        for (literal, _) in self.decision_queue.drain(cut..) {
            self.decision_map[literal.unsigned_abs() as usize] = 0;
        }
        self.level_starts.truncate(target_level);
    }

    /// Variables decided true
    pub fn true_variables(&self) -> impl Iterator<Item = u32> + '_ {
        self.decision_map
            .iter()
            .enumerate()
            .filter(|(_, &d)| d > 0)
            .map(|(variable, _)| variable as u32)
    }

    /// Get the decision queue
    pub fn queue(&self) -> &[(Literal, Reason)] {
        &self.decision_queue
    }

    pub fn len(&self) -> usize {
        self.decision_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decision_queue.is_empty()
    }
}
