//! Named-variable SAT session
//!
//! A [`SatSession`] owns everything one problem needs: the variable registry, the
//! accumulated formula, the engine, and the model of the last satisfiable solve.
//!
//! ```no_run
//! use sathelper::SatSession;
//!
//! # fn main() -> sathelper::Result<()> {
//! let mut session = SatSession::new();
//! for name in ["a", "b", "c"] {
//!     session.declare_var(name);
//! }
//! session.add_at_most_one(&["a", "b", "c"])?;
//! session.add_clause(&["a"])?;
//!
//! if session.solve(true)?.is_satisfiable() {
//!     assert_eq!(session.value_of("b"), Some(false));
//! }
//! # Ok(())
//! # }
//! ```

use super::constraints::{self, Clause, Constraint};
use super::formula::Formula;
use super::literal::{Literal, ToLiteral};
use super::parser::EngineVerdict;
use super::solver::SatEngine;
use super::solver_factory::UnifiedSatSolver;
use super::variables::VariableRegistry;
use crate::config::Settings;
use crate::error::Result;
use crate::utils::display::format_model;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of a solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SolveOutcome {
    Satisfiable,
    Unsatisfiable,
    /// The engine gave no usable answer; this is not a proof of unsatisfiability
    Indeterminate(String),
}

impl SolveOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable)
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Unsatisfiable)
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Satisfiable => f.write_str("SATISFIABLE"),
            SolveOutcome::Unsatisfiable => f.write_str("UNSATISFIABLE"),
            SolveOutcome::Indeterminate(reason) => write!(f, "INDETERMINATE ({})", reason),
        }
    }
}

/// Statistics about the last solve
#[derive(Debug, Clone, Serialize)]
pub struct SolveStatistics {
    pub engine: String,
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_time: Duration,
    pub outcome: SolveOutcome,
}

impl fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Engine: {}", self.engine)?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Result: {}", self.outcome)?;
        Ok(())
    }
}

/// Builds a formula over named variables and solves it with a pluggable engine
pub struct SatSession {
    registry: VariableRegistry,
    formula: Formula,
    model: Vec<Literal>,
    engine: Box<dyn SatEngine>,
    indeterminate_as_unsat: bool,
    last_statistics: Option<SolveStatistics>,
}

impl SatSession {
    /// Session solving with the default external engine
    pub fn new() -> Self {
        Self::with_engine(UnifiedSatSolver::default())
    }

    /// Session solving with `engine`
    pub fn with_engine(engine: impl SatEngine + 'static) -> Self {
        Self {
            registry: VariableRegistry::new(),
            formula: Formula::new(),
            model: Vec::new(),
            engine: Box::new(engine),
            indeterminate_as_unsat: false,
            last_statistics: None,
        }
    }

    /// Session configured from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let mut session = Self::with_engine(UnifiedSatSolver::new(&settings.engine));
        session.indeterminate_as_unsat = settings.solve.indeterminate_as_unsat;
        session
    }

    /// Report indeterminate engine output as unsatisfiable
    pub fn set_indeterminate_as_unsat(&mut self, enabled: bool) {
        self.indeterminate_as_unsat = enabled;
    }

    /// Declare a variable, returning its DIMACS code; repeated declarations keep the code
    pub fn declare_var(&mut self, name: impl Into<String>) -> i32 {
        let code = self.registry.declare(name);
        self.formula.set_num_vars(self.registry.len());
        code
    }

    pub fn declare_vars<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare_var(name);
        }
    }

    pub fn code_of(&self, name: &str) -> Result<i32> {
        self.registry.code_of(name)
    }

    /// Textual form of a raw literal (`0`, `name` or `-name`)
    pub fn name_of(&self, code: i32) -> Option<String> {
        self.registry.name_of(code)
    }

    /// Raw DIMACS form of a named literal
    pub fn to_raw_literal(&self, literal: &Literal) -> Result<i32> {
        let code = self.registry.code_of(literal.variable_name())?;
        Ok(if literal.is_negated() { -code } else { code })
    }

    /// Add the disjunction of `literals`
    pub fn add_clause<L: ToLiteral>(&mut self, literals: &[L]) -> Result<()> {
        let literals = Self::collect_literals(literals)?;
        self.push_clauses(&[literals])
    }

    /// Forbid any two literals of `group` from being true together
    pub fn add_at_most_one<L: ToLiteral>(&mut self, group: &[L]) -> Result<()> {
        let group = Self::collect_literals(group)?;
        self.push_clauses(&constraints::at_most_one(&group))
    }

    /// Add the exactly-one clauses for `group`
    ///
    /// These do not force a literal of the group to be true; combine with
    /// [`add_at_least_one`](Self::add_at_least_one) for that.
    pub fn add_exactly_one<L: ToLiteral>(&mut self, group: &[L]) -> Result<()> {
        let group = Self::collect_literals(group)?;
        self.push_clauses(&constraints::exactly_one(&group))
    }

    pub fn add_at_least_one<L: ToLiteral>(&mut self, group: &[L]) -> Result<()> {
        let group = Self::collect_literals(group)?;
        self.push_clauses(&[constraints::at_least_one(&group)])
    }

    pub fn add_constraint(&mut self, constraint: &Constraint) -> Result<()> {
        self.push_clauses(&constraint.lower())
    }

    fn collect_literals<L: ToLiteral>(literals: &[L]) -> Result<Vec<Literal>> {
        literals.iter().map(ToLiteral::to_literal).collect()
    }

    /// Convert every clause before storing any, so a bad literal leaves the formula untouched
    fn push_clauses(&mut self, clauses: &[Vec<Literal>]) -> Result<()> {
        let raw = clauses
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|literal| self.to_raw_literal(literal))
                    .collect::<Result<Vec<i32>>>()
                    .map(Clause::new)
            })
            .collect::<Result<Vec<Clause>>>()?;

        for clause in raw {
            self.formula.push(clause);
        }
        Ok(())
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// DIMACS text of the current formula
    pub fn render(&self) -> String {
        self.formula.render()
    }

    pub fn print_formula(&self) {
        println!("{}", self.formula);
    }

    /// Solve the current formula
    ///
    /// Blocks until the engine is done. When `quiet` is false, a satisfying model is
    /// also printed to stdout.
    pub fn solve(&mut self, quiet: bool) -> Result<SolveOutcome> {
        self.model.clear();
        self.last_statistics = None;
        let start_time = Instant::now();

        let verdict = self.engine.solve(&self.formula)?;
        let outcome = match verdict {
            EngineVerdict::Satisfiable(assignment) => match self.decode_model(&assignment) {
                Ok(model) => {
                    self.model = model;
                    SolveOutcome::Satisfiable
                }
                Err(reason) => SolveOutcome::Indeterminate(reason),
            },
            EngineVerdict::Unsatisfiable => SolveOutcome::Unsatisfiable,
            EngineVerdict::Indeterminate(reason) => SolveOutcome::Indeterminate(reason),
        };

        let outcome = match outcome {
            SolveOutcome::Indeterminate(reason) if self.indeterminate_as_unsat => {
                warn!("Treating indeterminate result as unsatisfiable: {}", reason);
                SolveOutcome::Unsatisfiable
            }
            other => other,
        };

        info!("Solve finished: {}", outcome);
        self.last_statistics = Some(SolveStatistics {
            engine: self.engine.name().to_string(),
            variable_count: self.formula.num_vars(),
            clause_count: self.formula.num_clauses(),
            solve_time: start_time.elapsed(),
            outcome: outcome.clone(),
        });

        if outcome.is_satisfiable() && !quiet {
            println!("SATISFIABLE WITH VARS {}", format_model(&self.model));
        }

        Ok(outcome)
    }

    fn decode_model(&self, assignment: &[i32]) -> std::result::Result<Vec<Literal>, String> {
        assignment
            .iter()
            .map(|&raw| {
                self.registry
                    .literal_of(raw)
                    .ok_or_else(|| format!("solver returned unknown variable code {}", raw))
            })
            .collect()
    }

    /// Literals of the last satisfying assignment, in the order the engine reported them
    pub fn model(&self) -> &[Literal] {
        &self.model
    }

    /// Value of `name` in the last model, if the engine assigned it
    pub fn value_of(&self, name: &str) -> Option<bool> {
        self.model
            .iter()
            .find(|literal| literal.variable_name() == name)
            .map(|literal| !literal.is_negated())
    }

    /// Variables set to true in the last model
    pub fn true_variables(&self) -> impl Iterator<Item = &str> {
        self.model
            .iter()
            .filter(|literal| !literal.is_negated())
            .map(Literal::variable_name)
    }

    pub fn statistics(&self) -> Option<&SolveStatistics> {
        self.last_statistics.as_ref()
    }

    pub fn variable_count(&self) -> usize {
        self.registry.len()
    }

    pub fn clause_count(&self) -> usize {
        self.formula.num_clauses()
    }

    pub fn variables(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Clear variables, clauses and model; the engine is kept
    pub fn reset(&mut self) {
        self.registry.clear();
        self.formula.clear();
        self.model.clear();
        self.last_statistics = None;
    }
}

impl Default for SatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SatSession")
            .field("engine", &self.engine.name())
            .field("variables", &self.registry.len())
            .field("clauses", &self.formula.num_clauses())
            .field("model", &self.model)
            .finish()
    }
}
