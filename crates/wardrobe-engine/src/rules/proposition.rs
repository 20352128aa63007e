use std::fmt;

use super::variable::{Variable, VariableMap};
use crate::solver::Literal;

/// A boolean formula over entity and cloth variables.
///
/// Propositions are plain data: compiled once from the declared constraints
/// and lowered to clauses for every candidate that gets checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Proposition {
    Var(Variable),
    Not(Box<Proposition>),
    /// Conjunction, empty means true
    And(Vec<Proposition>),
    /// Disjunction, empty means false
    Or(Vec<Proposition>),
    Implies(Box<Proposition>, Box<Proposition>),
}

impl Proposition {
    pub fn var(variable: Variable) -> Self {
        Proposition::Var(variable)
    }

    pub fn not(inner: Proposition) -> Self {
        Proposition::Not(Box::new(inner))
    }

    pub fn and(parts: Vec<Proposition>) -> Self {
        Proposition::And(parts)
    }

    pub fn or(parts: Vec<Proposition>) -> Self {
        Proposition::Or(parts)
    }

    pub fn implies(premise: Proposition, conclusion: Proposition) -> Self {
        Proposition::Implies(Box::new(premise), Box::new(conclusion))
    }

    /// Every variable mentioned, in first-seen order without repeats
    pub fn variables(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut Vec<Variable>) {
        match self {
            Proposition::Var(v) => {
                if !out.contains(v) {
                    out.push(*v);
                }
            }
            Proposition::Not(inner) => inner.collect_variables(out),
            Proposition::And(parts) | Proposition::Or(parts) => {
                for part in parts {
                    part.collect_variables(out);
                }
            }
            Proposition::Implies(a, b) => {
                a.collect_variables(out);
                b.collect_variables(out);
            }
        }
    }

    /// Evaluate under an assignment
    pub fn evaluate<F>(&self, assignment: &F) -> bool
    where
        F: Fn(Variable) -> bool,
    {
        match self {
            Proposition::Var(v) => assignment(*v),
            Proposition::Not(inner) => !inner.evaluate(assignment),
            Proposition::And(parts) => parts.iter().all(|p| p.evaluate(assignment)),
            Proposition::Or(parts) => parts.iter().any(|p| p.evaluate(assignment)),
            Proposition::Implies(a, b) => !a.evaluate(assignment) || b.evaluate(assignment),
        }
    }

    /// Lower to conjunctive normal form.
    ///
    /// Negations are pushed to the variables and disjunctions distributed over
    /// conjunctions. Duplicate literals are merged and tautological clauses
    /// dropped, so an empty result means "always true" and an empty clause
    /// means "always false".
    pub fn to_clauses(&self, variables: &VariableMap) -> Vec<Vec<Literal>> {
        cnf(self, false, variables)
            .into_iter()
            .filter_map(normalize_clause)
            .collect()
    }
}

/// CNF of `p`, or of `!p` when `negated`.
fn cnf(p: &Proposition, negated: bool, variables: &VariableMap) -> Vec<Vec<Literal>> {
    match p {
        Proposition::Var(v) => {
            let literal = variables.literal(*v);
            vec![vec![if negated { -literal } else { literal }]]
        }
        Proposition::Not(inner) => cnf(inner, !negated, variables),
        Proposition::And(parts) if !negated => conjunction(parts.iter().map(|q| cnf(q, false, variables))),
        Proposition::Or(parts) if negated => conjunction(parts.iter().map(|q| cnf(q, true, variables))),
        Proposition::And(parts) => disjunction(parts.iter().map(|q| cnf(q, true, variables))),
        Proposition::Or(parts) => disjunction(parts.iter().map(|q| cnf(q, false, variables))),
        Proposition::Implies(a, b) if !negated => {
            disjunction([cnf(a, true, variables), cnf(b, false, variables)])
        }
        Proposition::Implies(a, b) => conjunction([cnf(a, false, variables), cnf(b, true, variables)]),
    }
}

fn conjunction<I>(parts: I) -> Vec<Vec<Literal>>
where
    I: IntoIterator<Item = Vec<Vec<Literal>>>,
{
    parts.into_iter().flatten().collect()
}

fn disjunction<I>(parts: I) -> Vec<Vec<Literal>>
where
    I: IntoIterator<Item = Vec<Vec<Literal>>>,
{
    // Start from "false": a single empty clause
    let mut result: Vec<Vec<Literal>> = vec![Vec::new()];
    for part in parts {
        let mut next = Vec::with_capacity(result.len() * part.len());
        for left in &result {
            for right in &part {
                let mut clause = left.clone();
                clause.extend_from_slice(right);
                next.push(clause);
            }
        }
        result = next;
    }
    result
}

fn normalize_clause(clause: Vec<Literal>) -> Option<Vec<Literal>> {
    let mut out: Vec<Literal> = Vec::with_capacity(clause.len());
    for literal in clause {
        if out.contains(&-literal) {
            return None;
        }
        if !out.contains(&literal) {
            out.push(literal);
        }
    }
    Some(out)
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Var(v) => write!(f, "{}", v),
            Proposition::Not(inner) => write!(f, "Not({})", inner),
            Proposition::And(parts) => write_list(f, "And", parts),
            Proposition::Or(parts) => write_list(f, "Or", parts),
            Proposition::Implies(a, b) => write!(f, "Implies({}, {})", a, b),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, parts: &[Proposition]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", part)?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorId, GarmentId};

    fn g(id: u32) -> Proposition {
        Proposition::var(Variable::Garment(GarmentId(id)))
    }

    fn map() -> VariableMap {
        // garments -> 1..=3, colors -> 4..=5
        VariableMap::new(3, 2)
    }

    fn sorted(mut clauses: Vec<Vec<Literal>>) -> Vec<Vec<Literal>> {
        for clause in &mut clauses {
            clause.sort();
        }
        clauses.sort();
        clauses
    }

    #[test]
    fn test_not_and_becomes_single_clause() {
        let p = Proposition::not(Proposition::and(vec![g(0), g(1)]));
        assert_eq!(p.to_clauses(&map()), vec![vec![-1, -2]]);
    }

    #[test]
    fn test_implies_becomes_binary_clause() {
        let p = Proposition::implies(g(0), g(2));
        assert_eq!(p.to_clauses(&map()), vec![vec![-1, 3]]);
    }

    #[test]
    fn test_implies_conjunction_splits() {
        // cloth => garment & color
        let cloth = Proposition::var(Variable::Cloth(GarmentId(0), ColorId(1)));
        let p = Proposition::implies(
            cloth,
            Proposition::and(vec![g(0), Proposition::var(Variable::Color(ColorId(1)))]),
        );
        let cloth_literal = map().literal(Variable::Cloth(GarmentId(0), ColorId(1)));
        assert_eq!(
            sorted(p.to_clauses(&map())),
            sorted(vec![vec![-cloth_literal, 1], vec![-cloth_literal, 5]])
        );
    }

    #[test]
    fn test_distribution() {
        // (a & b) | c  ==  (a | c) & (b | c)
        let p = Proposition::or(vec![Proposition::and(vec![g(0), g(1)]), g(2)]);
        assert_eq!(sorted(p.to_clauses(&map())), vec![vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn test_negated_implication() {
        // !(a => b)  ==  a & !b
        let p = Proposition::not(Proposition::implies(g(0), g(1)));
        assert_eq!(sorted(p.to_clauses(&map())), vec![vec![-2], vec![1]]);
    }

    #[test]
    fn test_constants() {
        assert!(Proposition::and(vec![]).to_clauses(&map()).is_empty());
        assert_eq!(Proposition::or(vec![]).to_clauses(&map()), vec![Vec::<Literal>::new()]);
        // Not(true) is false
        assert_eq!(
            Proposition::not(Proposition::and(vec![])).to_clauses(&map()),
            vec![Vec::<Literal>::new()]
        );
    }

    #[test]
    fn test_tautologies_and_duplicates_removed() {
        let p = Proposition::or(vec![g(0), Proposition::not(g(0))]);
        assert!(p.to_clauses(&map()).is_empty());

        let p = Proposition::not(Proposition::and(vec![g(1), g(1)]));
        assert_eq!(p.to_clauses(&map()), vec![vec![-2]]);
    }

    #[test]
    fn test_clauses_agree_with_evaluation() {
        let p = Proposition::implies(
            Proposition::or(vec![g(0), g(1)]),
            Proposition::not(Proposition::and(vec![g(1), g(2)])),
        );
        let clauses = p.to_clauses(&map());

        for bits in 0..8u32 {
            let value = |v: Variable| match v {
                Variable::Garment(id) => bits & (1 << id.0) != 0,
                _ => false,
            };
            let literal_true = |l: Literal| (l > 0) == (bits & (1 << (l.unsigned_abs() - 1)) != 0);
            let cnf_value = clauses.iter().all(|c| c.iter().any(|&l| literal_true(l)));
            assert_eq!(cnf_value, p.evaluate(&value), "assignment {:03b}", bits);
        }
    }

    #[test]
    fn test_variables_and_display() {
        let p = Proposition::implies(g(0), Proposition::and(vec![g(1), g(0)]));
        assert_eq!(
            p.variables(),
            vec![Variable::Garment(GarmentId(0)), Variable::Garment(GarmentId(1))]
        );
        assert_eq!(p.to_string(), "Implies(garment_0, And(garment_1, garment_0))");
    }
}
