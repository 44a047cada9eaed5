//! Raw clauses and cardinality constraint encoders

use super::literal::Literal;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        debug_assert!(!literals.contains(&0), "0 is reserved as the clause terminator");
        Self { literals }
    }
}

/// DIMACS line for the clause, terminator included
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for literal in &self.literals {
            write!(f, "{} ", literal)?;
        }
        f.write_str("0")
    }
}

/// Forbid any two literals of the group from being true together
///
/// Emits `{-a, -b}` for every pair `i < j`, in lexical pair order.
pub fn at_most_one(group: &[Literal]) -> Vec<Vec<Literal>> {
    group
        .iter()
        .tuple_combinations()
        .map(|(first, second)| vec![first.negate(), second.negate()])
        .collect()
}

/// One clause per literal: the literal followed by the negation of every other one
///
/// This alone does not force any literal of the group to be true; add
/// [`at_least_one`] for that.
pub fn exactly_one(group: &[Literal]) -> Vec<Vec<Literal>> {
    (0..group.len())
        .map(|i| {
            let mut clause = Vec::with_capacity(group.len());
            clause.push(group[i].clone());
            clause.extend(
                group
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, other)| other.negate()),
            );
            clause
        })
        .collect()
}

/// The plain disjunction of the group
pub fn at_least_one(group: &[Literal]) -> Vec<Literal> {
    group.to_vec()
}

/// A constraint over named literals, as it appears in problem files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "literals", rename_all = "snake_case")]
pub enum Constraint {
    Clause(Vec<Literal>),
    AtLeastOne(Vec<Literal>),
    AtMostOne(Vec<Literal>),
    ExactlyOne(Vec<Literal>),
}

impl Constraint {
    /// Lower the constraint to clauses over named literals
    pub fn lower(&self) -> Vec<Vec<Literal>> {
        match self {
            Constraint::Clause(literals) => vec![literals.clone()],
            Constraint::AtLeastOne(group) => vec![at_least_one(group)],
            Constraint::AtMostOne(group) => at_most_one(group),
            Constraint::ExactlyOne(group) => exactly_one(group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn group(names: &[&str]) -> Vec<Literal> {
        names.iter().map(|n| Literal::positive(*n)).collect()
    }

    fn satisfies(clauses: &[Vec<Literal>], assignment: &HashMap<&str, bool>) -> bool {
        clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| assignment[lit.variable_name()] != lit.is_negated())
        })
    }

    /// All assignments over `names`, in binary counting order
    fn assignments<'a>(names: &[&'a str]) -> Vec<HashMap<&'a str, bool>> {
        (0..1u32 << names.len())
            .map(|bits| {
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (*name, bits & (1 << i) != 0))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_clause_creation() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.literals, vec![1, -2, 3]);
        assert_eq!(clause.to_string(), "1 -2 3 0");
        assert_eq!(Clause::new(vec![]).to_string(), "0");
    }

    #[test]
    fn test_at_most_one_pair_order() {
        let clauses = at_most_one(&group(&["a", "b", "c"]));
        let rendered: Vec<Vec<String>> = clauses
            .iter()
            .map(|c| c.iter().map(|l| l.to_string()).collect())
            .collect();

        assert_eq!(
            rendered,
            vec![
                vec!["-a", "-b"],
                vec!["-a", "-c"],
                vec!["-b", "-c"],
            ]
        );
    }

    #[test]
    fn test_at_most_one_covers_every_pair_once() {
        for n in 0..7usize {
            let names: Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
            let lits: Vec<Literal> = names.iter().map(Literal::positive).collect();
            let clauses = at_most_one(&lits);

            assert_eq!(clauses.len(), n * n.saturating_sub(1) / 2);
            assert!(clauses.iter().all(|c| c.len() == 2));

            let pairs: HashSet<(String, String)> = clauses
                .iter()
                .map(|c| (c[0].variable_name().to_string(), c[1].variable_name().to_string()))
                .collect();
            assert_eq!(pairs.len(), clauses.len());
        }
    }

    #[test]
    fn test_at_most_one_semantics() {
        let names = ["a", "b", "c", "d"];
        let clauses = at_most_one(&group(&names));

        for assignment in assignments(&names) {
            let true_count = assignment.values().filter(|&&v| v).count();
            assert_eq!(satisfies(&clauses, &assignment), true_count <= 1);
        }
    }

    #[test]
    fn test_at_most_one_respects_polarity() {
        let lits = vec![Literal::negative("a"), Literal::positive("b")];
        let clauses = at_most_one(&lits);
        assert_eq!(clauses, vec![vec![Literal::positive("a"), Literal::negative("b")]]);
    }

    #[test]
    fn test_exactly_one_shape() {
        let lits = group(&["a", "b", "c"]);
        let clauses = exactly_one(&lits);

        assert_eq!(clauses.len(), 3);
        assert!(clauses.iter().all(|c| c.len() == 3));
        assert_eq!(
            clauses[1],
            vec![Literal::positive("b"), Literal::negative("a"), Literal::negative("c")]
        );
    }

    #[test]
    fn test_exactly_one_partial_semantics() {
        let names = ["a", "b", "c"];
        let clauses = exactly_one(&group(&names));

        // All false still satisfies the encoding on its own
        let all_false: HashMap<&str, bool> = names.iter().map(|n| (*n, false)).collect();
        assert!(satisfies(&clauses, &all_false));

        // Exactly one true satisfies it
        for name in names {
            let mut assignment = all_false.clone();
            assignment.insert(name, true);
            assert!(satisfies(&clauses, &assignment));
        }

        // Adding the disjunction rules out the all-false assignment
        let mut with_disjunction = clauses.clone();
        with_disjunction.push(at_least_one(&group(&names)));
        assert!(!satisfies(&with_disjunction, &all_false));
    }

    #[test]
    fn test_exactly_one_single_literal() {
        let clauses = exactly_one(&group(&["only"]));
        assert_eq!(clauses, vec![vec![Literal::positive("only")]]);
        assert!(exactly_one(&[]).is_empty());
    }

    #[test]
    fn test_constraint_lowering() {
        let lits = group(&["a", "b"]);
        assert_eq!(Constraint::Clause(lits.clone()).lower(), vec![lits.clone()]);
        assert_eq!(Constraint::AtLeastOne(lits.clone()).lower(), vec![lits.clone()]);
        assert_eq!(Constraint::AtMostOne(lits.clone()).lower().len(), 1);
        assert_eq!(Constraint::ExactlyOne(lits.clone()).lower().len(), 2);
    }

    #[test]
    fn test_constraint_serde_format() {
        let json = r#"{"kind":"at_most_one","literals":["a","-b"]}"#;
        let constraint: Constraint = serde_json::from_str(json).unwrap();
        assert_eq!(
            constraint,
            Constraint::AtMostOne(vec![Literal::positive("a"), Literal::negative("b")])
        );
        assert_eq!(serde_json::to_string(&constraint).unwrap(), json);
    }
}
