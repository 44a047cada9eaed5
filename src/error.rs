//! Error types for formula construction and solver invocation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the SAT layer
#[derive(Debug, Error)]
pub enum SatError {
    /// A literal referenced a variable that was never declared
    #[error("variable `{0}` is used before it was declared")]
    UndeclaredVariable(String),

    /// A textual literal could not be parsed
    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),

    /// The formula could not be written to the scratch file
    #[error("failed to write formula to {}: {source}", .path.display())]
    ScratchFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external engine could not be started
    #[error("failed to launch SAT engine `{engine}`: {source}")]
    Launch {
        engine: String,
        #[source]
        source: io::Error,
    },

    /// Reading the engine's output failed
    #[error("failed to read SAT engine output: {0}")]
    Output(#[source] io::Error),

    /// An in-process engine reported a failure
    #[error("SAT engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, SatError>;
