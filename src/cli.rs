//! Command line interface for the headless runner

use clap::Parser;
use std::fmt;

use crate::config::{ConfigError, SimulationConfig};
use crate::physics::execution::ExecutionStrategy;
use crate::physics::integrators::registry::IntegratorRegistry;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(ConfigError),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(err) => write!(f, "Failed to load configuration: {err}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigLoad(err) => Some(err),
            CliError::InvalidIntegrator(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::ConfigLoad(err)
    }
}

/// Gravitree - headless Barnes-Hut N-body simulation
#[derive(Parser, Debug, Default)]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Number of bodies to simulate (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub bodies: Option<usize>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Barnes-Hut opening angle; 0 computes every pair exactly
    #[arg(short = 't', long, value_name = "VALUE")]
    pub theta: Option<f64>,

    /// Softening length added to every separation
    #[arg(long, value_name = "VALUE")]
    pub softening: Option<f64>,

    /// Integrator type (e.g., velocity_verlet, symplectic_euler)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Random seed for body generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Exit after this many steps
    #[arg(long, value_name = "COUNT")]
    pub steps: Option<u64>,

    /// Simulated time per step
    #[arg(long, value_name = "SECONDS")]
    pub dt: Option<f64>,

    /// Spread the per-body loop across the compute task pool
    #[arg(long)]
    pub parallel: bool,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::default();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = match &args.config {
        Some(config_path) => {
            println!("Loading configuration from: {config_path}");
            SimulationConfig::load(config_path)?
        }
        None => SimulationConfig::load_from_user_config(),
    };

    if let Some(body_count) = args.bodies {
        println!("Overriding body count to: {body_count}");
        config.runner.body_count = body_count;
    }

    if let Some(gravity) = args.gravity {
        println!("Overriding gravitational constant to: {gravity}");
        config.physics.gravity = gravity;
    }

    if let Some(theta) = args.theta {
        println!("Overriding theta to: {theta}");
        config.physics.theta = theta;
    }

    if let Some(softening) = args.softening {
        println!("Overriding softening to: {softening}");
        config.physics.softening = softening;
    }

    if let Some(integrator_type) = &args.integrator {
        IntegratorRegistry::default()
            .create(integrator_type)
            .map_err(CliError::InvalidIntegrator)?;

        println!("Using integrator: {integrator_type}");
        config.runner.integrator = integrator_type.clone();
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.runner.seed = Some(seed);
    }

    if let Some(steps) = args.steps {
        config.runner.steps = Some(steps);
    }

    if let Some(dt) = args.dt {
        config.runner.dt = dt;
    }

    if args.parallel {
        config.runner.execution = ExecutionStrategy::Parallel;
    }

    if args.paused {
        config.runner.start_paused = true;
    }

    Ok(config)
}
