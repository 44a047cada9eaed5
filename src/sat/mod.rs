//! SAT encoding components: naming, clauses, encoders, serialization and solving

pub mod variables;
pub mod literal;
pub mod constraints;
pub mod formula;
pub mod parser;
pub mod solver;
pub mod cadical_solver;
pub mod solver_factory;
pub mod session;

pub use variables::VariableRegistry;
pub use literal::{Literal, ToLiteral, NEGATION_MARKER};
pub use constraints::{Clause, Constraint};
pub use formula::Formula;
pub use parser::{parse_solver_output, EngineVerdict};
pub use solver::{ExternalSolver, SatEngine};
pub use cadical_solver::CadicalEngine;
pub use solver_factory::UnifiedSatSolver;
pub use session::{SatSession, SolveOutcome, SolveStatistics};
