//! Configuration settings for the SAT helper

use crate::sat::solver::{DEFAULT_ENGINE, DEFAULT_MODEL_FLAG, DEFAULT_SCRATCH_FILE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub solve: SolveConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub backend: SolverBackend,
    /// Engine executable, looked up on `PATH` when not a path
    pub binary: String,
    /// Flag asking the engine to print its model
    pub model_flag: String,
    /// Where the formula is written before each solve
    pub scratch_file: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Run `binary` as a subprocess
    #[default]
    External,
    /// Solve in-process with CaDiCaL
    Cadical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Do not print the decoded model
    pub quiet: bool,
    /// Report unrecognized engine output as unsatisfiable instead of indeterminate
    pub indeterminate_as_unsat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print the DIMACS formula before solving
    pub print_formula: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::External,
            binary: DEFAULT_ENGINE.to_string(),
            model_flag: DEFAULT_MODEL_FLAG.to_string(),
            scratch_file: PathBuf::from(DEFAULT_SCRATCH_FILE),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.engine.backend == SolverBackend::External {
            if self.engine.binary.trim().is_empty() {
                anyhow::bail!("Engine binary must not be empty");
            }
            if self.engine.scratch_file.as_os_str().is_empty() {
                anyhow::bail!("Scratch file path must not be empty");
            }
            if self.engine.scratch_file.is_dir() {
                anyhow::bail!(
                    "Scratch file path is a directory: {}",
                    self.engine.scratch_file.display()
                );
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(backend) = cli_overrides.backend {
            self.engine.backend = backend;
        }
        if let Some(ref binary) = cli_overrides.engine {
            self.engine.binary = binary.clone();
        }
        if let Some(ref scratch_file) = cli_overrides.scratch_file {
            self.engine.scratch_file = scratch_file.clone();
        }
        if cli_overrides.quiet {
            self.solve.quiet = true;
        }
        if cli_overrides.print_formula {
            self.output.print_formula = true;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub backend: Option<SolverBackend>,
    pub engine: Option<String>,
    pub scratch_file: Option<PathBuf>,
    pub quiet: bool,
    pub print_formula: bool,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.engine.backend, SolverBackend::External);
        assert_eq!(settings.engine.binary, "glucose");
        assert_eq!(settings.engine.model_flag, "-model");
        assert_eq!(settings.engine.scratch_file, PathBuf::from("/tmp/formula.cnf"));
        assert!(!settings.solve.quiet);
        assert!(!settings.solve.indeterminate_as_unsat);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config").join("sathelper.yaml");

        let mut settings = Settings::default();
        settings.engine.backend = SolverBackend::Cadical;
        settings.solve.quiet = true;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("partial.yaml");
        std::fs::write(&path, "engine:\n  binary: kissat\nsolve:\n  quiet: true\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.engine.binary, "kissat");
        assert_eq!(settings.engine.model_flag, "-model");
        assert!(settings.solve.quiet);
        assert_eq!(settings.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = Settings::default();
        settings.engine.binary = "  ".to_string();
        assert!(settings.validate().is_err());

        // The in-process backend ignores the binary
        settings.engine.backend = SolverBackend::Cadical;
        assert!(settings.validate().is_ok());

        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.engine.scratch_file = temp_dir.path().to_path_buf();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unparsable_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        std::fs::write(&path, "engine: [not, a, map]\n").unwrap();
        assert!(Settings::from_file(&path).is_err());
        assert!(Settings::from_file(&temp_dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            backend: Some(SolverBackend::Cadical),
            engine: Some("minisat".to_string()),
            scratch_file: Some(PathBuf::from("/tmp/other.cnf")),
            quiet: true,
            print_formula: true,
            format: Some(OutputFormat::Json),
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.engine.backend, SolverBackend::Cadical);
        assert_eq!(settings.engine.binary, "minisat");
        assert_eq!(settings.engine.scratch_file, PathBuf::from("/tmp/other.cnf"));
        assert!(settings.solve.quiet);
        assert!(settings.output.print_formula);
        assert_eq!(settings.output.format, OutputFormat::Json);

        // Empty overrides change nothing
        let before = settings.clone();
        settings.merge_with_cli(&CliOverrides::default());
        assert_eq!(settings, before);
    }
}
