//! Output helpers

pub mod display;

pub use display::{format_model, ColorOutput, SolveReport};
