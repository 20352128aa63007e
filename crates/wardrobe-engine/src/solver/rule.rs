use std::fmt;
use std::hash::{Hash, Hasher};

/// A literal in SAT terms - positive means "worn", negative means "not worn"
pub type Literal = i32;

/// Where a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Compiled from a declared constraint
    Constraint,
    /// A cloth implies its garment and its color
    ClothParts,
    /// A worn garment needs one of its candidate cloths
    GarmentCover,
    /// A worn color needs one of its candidate cloths
    ColorCover,
    /// At least one cloth of the candidate is worn
    AnyCloth,
    /// Garment outside the candidate, never worn
    Absent,
}

impl RuleType {
    fn as_str(&self) -> &'static str {
        match self {
            RuleType::Constraint => "constraint",
            RuleType::ClothParts => "cloth-parts",
            RuleType::GarmentCover => "garment-cover",
            RuleType::ColorCover => "color-cover",
            RuleType::AnyCloth => "any-cloth",
            RuleType::Absent => "absent",
        }
    }
}

/// A SAT rule (clause).
///
/// Rules are disjunctions (OR) of literals. A rule is satisfied when
/// at least one of its literals is true.
///
/// # Examples
///
/// - `[A]` - A must be worn (assertion)
/// - `[-A]` - A must not be worn
/// - `[-A, B, C]` - if A is worn, then B or C must be worn
/// - `[-A, -B]` - A and B cannot both be worn
#[derive(Clone)]
pub struct Rule {
    literals: Vec<Literal>,
    rule_type: RuleType,
    /// Rule ID (assigned by RuleSet)
    id: u32,
}

impl Rule {
    /// Create a new rule. Repeated literals are merged.
    pub fn new(literals: Vec<Literal>, rule_type: RuleType) -> Self {
        let mut unique = Vec::with_capacity(literals.len());
        for literal in literals {
            debug_assert!(literal != 0, "literal 0 is reserved");
            if !unique.contains(&literal) {
                unique.push(literal);
            }
        }

        Self {
            literals: unique,
            rule_type,
            id: 0,
        }
    }

    /// Create an assertion rule (single literal that must be true)
    pub fn assertion(literal: Literal, rule_type: RuleType) -> Self {
        Self::new(vec![literal], rule_type)
    }

    /// If `source` holds, one of `targets` must hold
    pub fn implies(source: Literal, targets: Vec<Literal>, rule_type: RuleType) -> Self {
        let mut literals = vec![-source];
        literals.extend(targets);
        Self::new(literals, rule_type)
    }

    /// Set the rule ID
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Check if this is an assertion (single literal)
    pub fn is_assertion(&self) -> bool {
        self.literals.len() == 1
    }

    /// Contains a literal and its negation, so always satisfied
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|&l| self.literals.contains(&-l))
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty rule can never be satisfied
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Get a hash of this rule's literals for deduplication
    pub fn literal_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();

        let mut sorted = self.literals.clone();
        sorted.sort();
        sorted.hash(&mut hasher);

        hasher.finish()
    }

    /// Check if two rules have the same literals (regardless of order)
    pub fn equals_literals(&self, other: &Rule) -> bool {
        if self.literals.len() != other.literals.len() {
            return false;
        }

        let mut a = self.literals.clone();
        let mut b = other.literals.clone();
        a.sort();
        b.sort();
        a == b
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({:?}, {:?})", self.rule_type, self.literals)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literals: Vec<String> = self
            .literals
            .iter()
            .map(|&l| if l > 0 { format!("+{}", l) } else { format!("{}", l) })
            .collect();

        write!(f, "({}) [{}]", self.rule_type.as_str(), literals.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_assertion() {
        let rule = Rule::assertion(-5, RuleType::Absent);
        assert!(rule.is_assertion());
        assert_eq!(rule.literals(), &[-5]);
    }

    #[test]
    fn test_rule_implies() {
        let rule = Rule::implies(1, vec![2, 3, 4], RuleType::GarmentCover);
        assert_eq!(rule.literals(), &[-1, 2, 3, 4]);
        assert_eq!(rule.rule_type(), RuleType::GarmentCover);
    }

    #[test]
    fn test_duplicate_literals_merged() {
        let rule = Rule::new(vec![2, -3, 2], RuleType::Constraint);
        assert_eq!(rule.literals(), &[2, -3]);
    }

    #[test]
    fn test_tautology() {
        assert!(Rule::new(vec![1, -1, 2], RuleType::Constraint).is_tautology());
        assert!(!Rule::new(vec![1, 2], RuleType::Constraint).is_tautology());
    }

    #[test]
    fn test_rule_literal_hash() {
        let rule1 = Rule::new(vec![1, 2, 3], RuleType::Constraint);
        let rule2 = Rule::new(vec![3, 1, 2], RuleType::Constraint);
        let rule3 = Rule::new(vec![1, 2, 4], RuleType::Constraint);

        assert_eq!(rule1.literal_hash(), rule2.literal_hash());
        assert_ne!(rule1.literal_hash(), rule3.literal_hash());
    }

    #[test]
    fn test_rule_equals_literals() {
        let rule1 = Rule::new(vec![1, 2, 3], RuleType::Constraint);
        let rule2 = Rule::new(vec![3, 1, 2], RuleType::AnyCloth);
        let rule3 = Rule::new(vec![1, 2], RuleType::Constraint);

        assert!(rule1.equals_literals(&rule2));
        assert!(!rule1.equals_literals(&rule3));
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::implies(1, vec![2, 3], RuleType::ColorCover);
        assert_eq!(format!("{}", rule), "(color-cover) [-1 | +2 | +3]");
    }
}
