//! Factory for creating SAT engine instances based on configuration

use super::cadical_solver::CadicalEngine;
use super::formula::Formula;
use super::parser::EngineVerdict;
use super::solver::{ExternalSolver, SatEngine};
use crate::config::{EngineConfig, SolverBackend};
use crate::error::Result;

/// SAT engine that can use any of the configured backends
#[derive(Debug, Clone)]
pub enum UnifiedSatSolver {
    External(ExternalSolver),
    Cadical(CadicalEngine),
}

impl UnifiedSatSolver {
    /// Create an engine for the configured backend
    pub fn new(config: &EngineConfig) -> Self {
        match config.backend {
            SolverBackend::External => UnifiedSatSolver::External(ExternalSolver::from_config(config)),
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalEngine::new()),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::External(_) => SolverBackend::External,
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::External(ExternalSolver::default())
    }
}

impl SatEngine for UnifiedSatSolver {
    fn name(&self) -> &str {
        match self {
            UnifiedSatSolver::External(solver) => solver.name(),
            UnifiedSatSolver::Cadical(solver) => solver.name(),
        }
    }

    fn solve(&mut self, formula: &Formula) -> Result<EngineVerdict> {
        match self {
            UnifiedSatSolver::External(solver) => solver.solve(formula),
            UnifiedSatSolver::Cadical(solver) => solver.solve(formula),
        }
    }
}
