//! DIMACS CNF formula and its serialization

use super::constraints::Clause;
use crate::error::{Result, SatError};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Clauses of a session together with the number of declared variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
    num_vars: usize,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Record the declared-variable count used in the header
    pub fn set_num_vars(&mut self, num_vars: usize) {
        self.num_vars = num_vars;
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clear(&mut self) {
        self.clauses.clear();
        self.num_vars = 0;
    }

    /// DIMACS header line, without newline
    pub fn header(&self) -> String {
        format!("p cnf {} {}", self.num_vars, self.clauses.len())
    }

    /// Render the formula as DIMACS CNF text
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn write_dimacs<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.header())?;
        for clause in &self.clauses {
            writeln!(writer, "{}", clause)?;
        }
        Ok(())
    }

    /// Write the DIMACS text to `path`, replacing any existing file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let scratch_error = |source| SatError::ScratchFile {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(scratch_error)?;
        let mut writer = BufWriter::new(file);
        self.write_dimacs(&mut writer).map_err(scratch_error)?;
        writer.flush().map_err(scratch_error)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for clause in &self.clauses {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}
