use std::collections::HashMap;

use super::rule::{Rule, RuleType};

/// Collection of SAT rules.
///
/// The RuleSet manages rules with:
/// - Deduplication based on literal content
/// - Sequential ID assignment
#[derive(Debug, Default)]
pub struct RuleSet {
    /// All rules indexed by ID
    rules: Vec<Rule>,

    /// Rules by type for iteration
    rules_by_type: HashMap<RuleType, Vec<u32>>,

    /// Hash map for deduplication
    rule_hashes: HashMap<u64, u32>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to the set, returning its ID.
    /// Returns existing rule's ID if a duplicate exists.
    pub fn add(&mut self, mut rule: Rule) -> u32 {
        let hash = rule.literal_hash();
        if let Some(&existing_id) = self.rule_hashes.get(&hash) {
            // Verify it's actually the same rule (hash collision check)
            if let Some(existing) = self.get(existing_id) {
                if existing.equals_literals(&rule) {
                    return existing_id;
                }
            }
        }

        let id = self.rules.len() as u32;
        rule.set_id(id);

        self.rules_by_type.entry(rule.rule_type()).or_default().push(id);
        self.rule_hashes.insert(hash, id);
        self.rules.push(rule);

        id
    }

    pub fn get(&self, id: u32) -> Option<&Rule> {
        self.rules.get(id as usize)
    }

    /// Get all rules of a specific type
    pub fn rules_of_type(&self, rule_type: RuleType) -> impl Iterator<Item = &Rule> {
        self.rules_by_type
            .get(&rule_type)
            .into_iter()
            .flatten()
            .filter_map(move |&id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Get assertion rules (single literal rules)
    pub fn assertions(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.is_assertion())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Count rules by type
    pub fn count_by_type(&self, rule_type: RuleType) -> usize {
        self.rules_by_type.get(&rule_type).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_add() {
        let mut rules = RuleSet::new();
        let id1 = rules.add(Rule::new(vec![1, 2], RuleType::Constraint));
        let id2 = rules.add(Rule::new(vec![-1, 3], RuleType::ClothParts));

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get(1).unwrap().id(), 1);
    }

    #[test]
    fn test_rule_set_deduplication() {
        let mut rules = RuleSet::new();
        let id1 = rules.add(Rule::new(vec![1, 2, 3], RuleType::Constraint));
        let id2 = rules.add(Rule::new(vec![3, 2, 1], RuleType::AnyCloth));

        assert_eq!(id1, id2);
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_rule_set_by_type() {
        let mut rules = RuleSet::new();
        rules.add(Rule::assertion(-1, RuleType::Absent));
        rules.add(Rule::assertion(-2, RuleType::Absent));
        rules.add(Rule::new(vec![3, 4], RuleType::AnyCloth));

        assert_eq!(rules.count_by_type(RuleType::Absent), 2);
        assert_eq!(rules.count_by_type(RuleType::Constraint), 0);
        assert_eq!(rules.rules_of_type(RuleType::AnyCloth).count(), 1);
        assert_eq!(rules.assertions().count(), 2);
    }
}
