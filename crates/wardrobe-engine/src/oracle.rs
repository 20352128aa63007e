//! Satisfiability check of a single candidate dressing.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, Entity};
use crate::dressing::Dressing;
use crate::rules::Variable;
use crate::solver::{Literal, Rule, RuleType, SolveError, Solver};

/// Narrow interface of a SAT backend.
///
/// A fresh backend is created for every candidate.
pub trait SatBackend: Default {
    fn add_rule(&mut self, rule: Rule);

    /// Hint that `literal` should be tried first
    fn prefer(&mut self, literal: Literal);

    fn solve(&mut self, deadline: Option<Instant>) -> Result<bool, SolveError>;

    /// Truth value of `literal` in the model of the last successful solve
    fn value(&self, literal: Literal) -> Option<bool>;
}

impl SatBackend for Solver {
    fn add_rule(&mut self, rule: Rule) {
        Solver::add_rule(self, rule);
    }

    fn prefer(&mut self, literal: Literal) {
        Solver::prefer(self, literal);
    }

    fn solve(&mut self, deadline: Option<Instant>) -> Result<bool, SolveError> {
        Solver::solve(self, deadline)
    }

    fn value(&self, literal: Literal) -> Option<bool> {
        Solver::value(self, literal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unsatisfiable,
    /// The backend ran past the deadline
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The cloths of the candidate that are worn in the model
    Accepted(Dressing),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    pub fn accepted(&self) -> Option<&Dressing> {
        match self {
            Verdict::Accepted(dressing) => Some(dressing),
            Verdict::Rejected(_) => None,
        }
    }
}

/// Decides whether a candidate dressing can satisfy the catalog rules.
pub trait SatisfiabilityOracle: Sync {
    fn check(&self, catalog: &Catalog, candidate: &Dressing) -> Verdict;
}

/// Oracle backed by a [`SatBackend`], the built-in [`Solver`] by default.
#[derive(Debug)]
pub struct SatOracle<B = Solver> {
    timeout: Option<Duration>,
    backend: PhantomData<fn() -> B>,
}

impl<B> Clone for SatOracle<B> {
    fn clone(&self) -> Self {
        Self::new(self.timeout)
    }
}

impl<B> Default for SatOracle<B> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<B> SatOracle<B> {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            backend: PhantomData,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl<B: SatBackend> SatOracle<B> {
    /// Load every rule for `candidate` into `backend`.
    ///
    /// 1. the compiled catalog rules
    /// 2. each cloth implies its garment and its color
    /// 3. a worn garment needs one of its cloths
    /// 4. a worn color needs one of its cloths
    /// 5. at least one cloth is worn
    /// 6. catalog garments and colors outside the candidate are not worn
    pub fn load(&self, catalog: &Catalog, candidate: &Dressing, backend: &mut B) {
        let variables = catalog.variables();

        for proposition in catalog.rules() {
            for clause in proposition.to_clauses(&variables) {
                backend.add_rule(Rule::new(clause, RuleType::Constraint));
            }
        }

        let mut by_garment: BTreeMap<Literal, Vec<Literal>> = BTreeMap::new();
        let mut by_color: BTreeMap<Literal, Vec<Literal>> = BTreeMap::new();
        let mut cloths = Vec::with_capacity(candidate.len());

        for cloth in candidate {
            for clause in cloth.rule().to_clauses(&variables) {
                backend.add_rule(Rule::new(clause, RuleType::ClothParts));
            }

            let literal = variables.literal(cloth.variable());
            backend.prefer(literal);
            cloths.push(literal);

            by_garment
                .entry(variables.literal(Variable::Garment(cloth.garment)))
                .or_default()
                .push(literal);
            by_color
                .entry(variables.literal(Variable::Color(cloth.color)))
                .or_default()
                .push(literal);
        }

        for (garment, covering) in by_garment {
            backend.add_rule(Rule::implies(garment, covering, RuleType::GarmentCover));
        }
        for (color, covering) in by_color {
            backend.add_rule(Rule::implies(color, covering, RuleType::ColorCover));
        }

        backend.add_rule(Rule::new(cloths, RuleType::AnyCloth));

        for garment in catalog.garments() {
            if !candidate.wears(garment.id()) {
                backend.add_rule(Rule::assertion(-variables.literal(garment.variable()), RuleType::Absent));
            }
        }
        for color in catalog.colors() {
            if !candidate.carries(color.id()) {
                backend.add_rule(Rule::assertion(-variables.literal(color.variable()), RuleType::Absent));
            }
        }
    }
}

impl<B: SatBackend> SatisfiabilityOracle for SatOracle<B> {
    fn check(&self, catalog: &Catalog, candidate: &Dressing) -> Verdict {
        let mut backend = B::default();
        self.load(catalog, candidate, &mut backend);

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        match backend.solve(deadline) {
            Ok(true) => {
                let variables = catalog.variables();
                Verdict::Accepted(candidate.subset(|cloth| {
                    backend.value(variables.literal(cloth.variable())) == Some(true)
                }))
            }
            Ok(false) => Verdict::Rejected(Rejection::Unsatisfiable),
            Err(SolveError::Timeout { iterations }) => {
                log::debug!("Gave up after {} iterations", iterations);
                Verdict::Rejected(Rejection::Timeout(self.timeout.unwrap_or_default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorId, GarmentId};
    use crate::dressing::Cloth;

    const WARDROBE: &str = r#"{
        "garments": ["Shirt", "Pants", "Hat"],
        "colors": ["Red", "Blue"],
        "constraints": [
            {"type": "not", "object": "color", "values": [["Red", "Blue"]]}
        ]
    }"#;

    fn candidate(pairs: &[(u32, u32)]) -> Dressing {
        Dressing::new(
            pairs
                .iter()
                .map(|&(g, c)| Cloth::new(GarmentId(g), ColorId(c)))
                .collect(),
        )
    }

    #[test]
    fn test_rules_loaded_per_candidate() {
        let catalog = Catalog::load("test", WARDROBE).unwrap();
        let oracle: SatOracle = SatOracle::default();
        let mut solver = Solver::new();

        oracle.load(&catalog, &candidate(&[(0, 0), (1, 1)]), &mut solver);

        let rules = solver.rules();
        assert_eq!(rules.count_by_type(RuleType::Constraint), 1);
        assert_eq!(rules.count_by_type(RuleType::ClothParts), 4);
        assert_eq!(rules.count_by_type(RuleType::GarmentCover), 2);
        assert_eq!(rules.count_by_type(RuleType::ColorCover), 2);
        assert_eq!(rules.count_by_type(RuleType::AnyCloth), 1);
        assert_eq!(rules.count_by_type(RuleType::Absent), 1);
    }

    #[test]
    fn test_conflicting_colors_reduced_to_subset() {
        let catalog = Catalog::load("test", WARDROBE).unwrap();
        let oracle: SatOracle = SatOracle::default();

        let verdict = oracle.check(&catalog, &candidate(&[(0, 0), (1, 1)]));
        assert_eq!(verdict, Verdict::Accepted(candidate(&[(0, 0)])));
    }

    #[test]
    fn test_compatible_candidate_accepted_whole() {
        let catalog = Catalog::load("test", WARDROBE).unwrap();
        let oracle: SatOracle = SatOracle::default();

        let whole = candidate(&[(0, 1), (1, 1), (2, 1)]);
        assert_eq!(oracle.check(&catalog, &whole), Verdict::Accepted(whole.clone()));
    }

    #[test]
    fn test_empty_candidate_rejected() {
        let catalog = Catalog::load("test", WARDROBE).unwrap();
        let oracle: SatOracle = SatOracle::default();

        assert_eq!(
            oracle.check(&catalog, &Dressing::default()),
            Verdict::Rejected(Rejection::Unsatisfiable)
        );
    }

    #[test]
    fn test_unsatisfiable_candidate_rejected() {
        let json = r#"{
            "garments": ["Shirt"],
            "colors": ["Red"],
            "constraints": [{"type": "not", "object": "garment", "values": [["Shirt"]]}]
        }"#;
        let catalog = Catalog::load("test", json).unwrap();
        let oracle: SatOracle = SatOracle::default();

        let verdict = oracle.check(&catalog, &candidate(&[(0, 0)]));
        assert_eq!(verdict, Verdict::Rejected(Rejection::Unsatisfiable));
        assert!(!verdict.is_accepted());
        assert!(verdict.accepted().is_none());
    }

    #[test]
    fn test_colors_outside_candidate_asserted_absent() {
        let catalog = Catalog::load("test", WARDROBE).unwrap();
        let oracle: SatOracle = SatOracle::default();
        let mut solver = Solver::new();

        oracle.load(&catalog, &candidate(&[(0, 0)]), &mut solver);

        // pants, hat and blue
        assert_eq!(solver.rules().count_by_type(RuleType::Absent), 3);
        assert_eq!(solver.rules().count_by_type(RuleType::ColorCover), 1);
    }

    #[test]
    fn test_color_implication_needs_a_cloth_of_that_color() {
        let json = r#"{
            "garments": ["Shirt", "Pants"],
            "colors": ["Red", "Blue"],
            "constraints": [{"type": "implies", "object": "color", "values": [["Red", "Blue"]]}]
        }"#;
        let catalog = Catalog::load("test", json).unwrap();
        let oracle: SatOracle = SatOracle::default();

        assert_eq!(
            oracle.check(&catalog, &candidate(&[(0, 0)])),
            Verdict::Rejected(Rejection::Unsatisfiable)
        );

        let both = candidate(&[(0, 0), (1, 1)]);
        assert_eq!(oracle.check(&catalog, &both), Verdict::Accepted(both.clone()));
    }

    #[derive(Default)]
    struct NeverFinishes;

    impl SatBackend for NeverFinishes {
        fn add_rule(&mut self, _rule: Rule) {}
        fn prefer(&mut self, _literal: Literal) {}
        fn solve(&mut self, _deadline: Option<Instant>) -> Result<bool, SolveError> {
            Err(SolveError::Timeout { iterations: 1 })
        }
        fn value(&self, _literal: Literal) -> Option<bool> {
            None
        }
    }

    #[test]
    fn test_timeout_reported() {
        let catalog = Catalog::load("test", WARDROBE).unwrap();
        let oracle: SatOracle<NeverFinishes> = SatOracle::new(Some(Duration::from_millis(10)));

        assert_eq!(
            oracle.check(&catalog, &candidate(&[(0, 0)])),
            Verdict::Rejected(Rejection::Timeout(Duration::from_millis(10)))
        );
    }
}
