//! Configuration management for the SAT helper

pub mod settings;

pub use settings::{
    Settings, EngineConfig, SolveConfig, OutputConfig, OutputFormat, CliOverrides, SolverBackend
};
