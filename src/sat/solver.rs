//! SAT engine interface and the external subprocess backend

use super::formula::Formula;
use super::parser::{parse_solver_output, EngineVerdict};
use crate::config::EngineConfig;
use crate::error::{Result, SatError};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Default engine binary
pub const DEFAULT_ENGINE: &str = "glucose";
/// Flag asking the engine to print the model
pub const DEFAULT_MODEL_FLAG: &str = "-model";
/// Default location of the formula handed to the engine
pub const DEFAULT_SCRATCH_FILE: &str = "/tmp/formula.cnf";

/// Anything able to decide a CNF formula
pub trait SatEngine {
    /// Human-readable engine name, used in logs
    fn name(&self) -> &str;

    /// Decide `formula`, blocking until the engine is done
    fn solve(&mut self, formula: &Formula) -> Result<EngineVerdict>;
}

/// Runs a SAT engine binary as a subprocess: `<binary> -model <scratch file>`
///
/// The scratch file is shared by every solver pointed at the same path, so sessions
/// that solve concurrently need distinct `scratch_file`s.
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    binary: String,
    model_flag: String,
    scratch_file: PathBuf,
}

impl ExternalSolver {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            model_flag: DEFAULT_MODEL_FLAG.to_string(),
            scratch_file: PathBuf::from(DEFAULT_SCRATCH_FILE),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            model_flag: config.model_flag.clone(),
            scratch_file: config.scratch_file.clone(),
        }
    }

    pub fn with_scratch_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_file = path.into();
        self
    }

    pub fn with_model_flag(mut self, flag: impl Into<String>) -> Self {
        self.model_flag = flag.into();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn scratch_file(&self) -> &Path {
        &self.scratch_file
    }

    /// The engine command line, without stdio configuration
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(&self.model_flag).arg(&self.scratch_file);
        cmd
    }

    /// Write `formula` to the scratch file and start the engine on it
    ///
    /// The returned child has its stdout and stderr piped. Callers that need a time
    /// limit can own the handle, kill it when they see fit, and still pass it to
    /// [`collect_output`](Self::collect_output).
    pub fn spawn(&self, formula: &Formula) -> Result<Child> {
        formula.write_to_file(&self.scratch_file)?;

        let mut cmd = self.command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running SAT engine: {:?}", cmd);
        cmd.spawn().map_err(|source| SatError::Launch {
            engine: self.binary.clone(),
            source,
        })
    }

    /// Wait for the engine to exit and return everything it wrote to stdout
    pub fn collect_output(&self, child: Child) -> Result<String> {
        let output = child.wait_with_output().map_err(SatError::Output)?;

        // Engines signal the verdict through exit codes 10/20, so a non-zero
        // status is not a failure by itself
        debug!("SAT engine `{}` exited with {}", self.binary, output.status);

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("SAT engine stderr:\n{}", stderr.trim_end());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for ExternalSolver {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl SatEngine for ExternalSolver {
    fn name(&self) -> &str {
        &self.binary
    }

    fn solve(&mut self, formula: &Formula) -> Result<EngineVerdict> {
        info!(
            "Solving {} variables, {} clauses with `{}`",
            formula.num_vars(),
            formula.num_clauses(),
            self.binary
        );

        let start_time = Instant::now();
        let child = self.spawn(formula)?;
        let stdout = self.collect_output(child)?;
        let verdict = parse_solver_output(&stdout);

        debug!(
            "SAT engine finished in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        if let EngineVerdict::Indeterminate(reason) = &verdict {
            warn!("SAT engine `{}` gave no usable answer: {}", self.binary, reason);
        }

        Ok(verdict)
    }
}
