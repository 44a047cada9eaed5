//! Command-line front end for the SAT helper

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sathelper::{
    config::{CliOverrides, OutputFormat, Settings, SolverBackend},
    problem::ProblemDefinition,
    sat::SatSession,
    utils::{ColorOutput, SolveReport},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sathelper")]
#[command(about = "Solve named-variable SAT problems with a DIMACS solver")]
#[command(version)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file
    Solve {
        /// Problem file (YAML, or JSON with a .json extension)
        problem: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "config/sathelper.yaml")]
        config: PathBuf,

        /// Solver backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<BackendArg>,

        /// Engine binary (overrides config)
        #[arg(short, long)]
        engine: Option<String>,

        /// Scratch file for the formula (overrides config)
        #[arg(short, long)]
        scratch: Option<PathBuf>,

        /// Do not print the decoded model
        #[arg(short, long)]
        quiet: bool,

        /// Print the DIMACS formula before solving
        #[arg(long)]
        print_formula: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the DIMACS encoding of a problem file
    Render {
        /// Problem file (YAML, or JSON with a .json extension)
        problem: PathBuf,

        /// Write the formula here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a default configuration and an example problem
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    External,
    Cadical,
}

impl From<BackendArg> for SolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::External => SolverBackend::External,
            BackendArg::Cadical => SolverBackend::Cadical,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            problem, config, backend, engine, scratch, quiet, print_formula, json
        } => {
            let overrides = CliOverrides {
                backend: backend.map(SolverBackend::from),
                engine,
                scratch_file: scratch,
                quiet,
                print_formula,
                format: json.then_some(OutputFormat::Json),
            };
            solve_command(&problem, &config, &overrides)
        }
        Commands::Render { problem, output } => render_command(&problem, output.as_deref()),
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::info!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn solve_command(problem_path: &Path, config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    let problem = ProblemDefinition::load_from_file(problem_path)?;
    let mut session = SatSession::from_settings(&settings);
    problem.apply(&mut session)?;

    if settings.output.print_formula {
        session.print_formula();
    }

    // The report below already contains the model
    let outcome = session.solve(true).context("Failed to solve problem")?;
    let report = SolveReport::from_session(&session, outcome.clone());

    match settings.output.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text if settings.solve.quiet => {
            println!("{}", ColorOutput::outcome(&outcome))
        }
        OutputFormat::Text => print!("{}", report.to_text()),
    }

    if let Some(stats) = session.statistics() {
        tracing::info!("\n{}", stats);
    }

    Ok(())
}

fn render_command(problem_path: &Path, output: Option<&Path>) -> Result<()> {
    let problem = ProblemDefinition::load_from_file(problem_path)?;
    let mut session = SatSession::new();
    problem.apply(&mut session)?;

    match output {
        Some(path) => {
            session.formula().write_to_file(path)?;
            eprintln!(
                "Wrote {} variables, {} clauses to {}",
                session.variable_count(),
                session.clause_count(),
                path.display()
            );
        }
        None => print!("{}", session.render()),
    }
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    let config_path = directory.join("config").join("sathelper.yaml");
    let problem_path = directory.join("problems").join("example.yaml");

    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    if !problem_path.exists() || force {
        std::fs::create_dir_all(directory.join("problems"))?;
        ProblemDefinition::example()
            .save_to_file(&problem_path)
            .context("Failed to create example problem")?;
        println!("Created: {}", problem_path.display());
    } else {
        println!("Skipped: {} (already exists)", problem_path.display());
    }

    println!("\n{}", ColorOutput::success("Setup complete"));
    println!("Run: sathelper solve {}", problem_path.display());
    Ok(())
}
