//! Problem definition loaded from YAML or JSON

use crate::sat::{Constraint, SatSession};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Variables and constraints of a problem, in the order they are applied
///
/// ```yaml
/// variables: [a, b, c]
/// constraints:
///   - kind: at_most_one
///     literals: [a, b, c]
///   - kind: clause
///     literals: [a]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDefinition {
    pub variables: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl ProblemDefinition {
    /// Parse YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML problem")
    }

    /// Parse JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON problem")
    }

    /// Load a problem file; `.json` files are read as JSON, anything else as YAML
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read problem file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let problem = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        problem.with_context(|| format!("Invalid problem file: {}", path.display()))
    }

    /// Save as YAML, or JSON for `.json` paths
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write problem file: {}", path.display()))
    }

    /// Declare the variables and add the constraints to `session`
    pub fn apply(&self, session: &mut SatSession) -> Result<()> {
        session.declare_vars(self.variables.iter().cloned());

        for (index, constraint) in self.constraints.iter().enumerate() {
            session
                .add_constraint(constraint)
                .with_context(|| format!("Constraint #{} is invalid", index + 1))?;
        }
        Ok(())
    }

    /// A three-variable example: at most one of `a`, `b`, `c`, and `a` holds
    pub fn example() -> Self {
        use crate::sat::Literal;

        let group: Vec<Literal> = ["a", "b", "c"].into_iter().map(Literal::positive).collect();
        Self {
            variables: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            constraints: vec![
                Constraint::AtMostOne(group),
                Constraint::Clause(vec![Literal::positive("a")]),
            ],
        }
    }
}
