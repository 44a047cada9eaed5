//! Named-variable front end for DIMACS SAT solvers
//!
//! This library lets callers build CNF formulas over named boolean variables,
//! hands them to a SAT engine (an external solver binary or an embedded one),
//! and maps the returned model back to variable names.

pub mod config;
pub mod error;
pub mod problem;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::{Result, SatError};
pub use problem::ProblemDefinition;
pub use sat::{Literal, SatSession, SolveOutcome};

/// Build the problem in a session configured by `settings` and solve it
pub fn solve_problem(
    settings: &Settings,
    problem: &ProblemDefinition,
) -> anyhow::Result<(SatSession, SolveOutcome)> {
    let mut session = SatSession::from_settings(settings);
    problem.apply(&mut session)?;
    let outcome = session.solve(settings.solve.quiet)?;
    Ok((session, outcome))
}
