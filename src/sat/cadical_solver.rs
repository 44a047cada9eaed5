//! In-process SAT engine using CaDiCaL

use super::formula::Formula;
use super::parser::EngineVerdict;
use super::solver::SatEngine;
use crate::error::Result;
use cadical::Solver;
use std::time::Instant;
use tracing::debug;

/// Decides formulas with an embedded CaDiCaL instance
///
/// A fresh solver is built for every call, so nothing carries over between solves.
#[derive(Debug, Default, Clone, Copy)]
pub struct CadicalEngine;

impl CadicalEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SatEngine for CadicalEngine {
    fn name(&self) -> &str {
        "cadical"
    }

    fn solve(&mut self, formula: &Formula) -> Result<EngineVerdict> {
        let start_time = Instant::now();
        let mut solver: Solver = Solver::new();

        for clause in formula.clauses() {
            solver.add_clause(clause.literals.iter().copied());
        }

        let result = solver.solve();
        debug!(
            "CaDiCaL finished in {:.3}s: {:?}",
            start_time.elapsed().as_secs_f64(),
            result
        );

        Ok(match result {
            Some(true) => {
                // Variables CaDiCaL never saw are unconstrained; report them false
                let max_variable = solver.max_variable();
                let assignment = (1..=formula.num_vars() as i32)
                    .map(|var| {
                        let value = var <= max_variable && solver.value(var) == Some(true);
                        if value { var } else { -var }
                    })
                    .collect();
                EngineVerdict::Satisfiable(assignment)
            }
            Some(false) => EngineVerdict::Unsatisfiable,
            None => EngineVerdict::Indeterminate("CaDiCaL stopped without a result".to_string()),
        })
    }
}
