use crate::physics::execution::ExecutionStrategy;
use crate::physics::integrators::DEFAULT_INTEGRATOR;
use crate::physics::math::Scalar;
use crate::simulation::SimulationParameters;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variables with this prefix override file settings, e.g.
/// `GRAVITREE__PHYSICS__THETA=0.5`.
pub const ENV_PREFIX: &str = "GRAVITREE";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Layered(config::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid TOML: {err}"),
            ConfigError::Serialize(err) => write!(f, "could not serialize configuration: {err}"),
            ConfigError::Layered(err) => write!(f, "could not merge configuration sources: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Serialize(err) => Some(err),
            ConfigError::Layered(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Layered(err)
    }
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: SimulationParameters,
    pub runner: RunnerConfig,
}

/// How the simulation is driven, as opposed to what it simulates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    pub body_count: usize,
    /// Simulated time per step
    pub dt: Scalar,
    /// Exit after this many steps; run until interrupted when unset
    pub steps: Option<u64>,
    pub seed: Option<u64>,
    pub integrator: String,
    pub execution: ExecutionStrategy,
    pub start_paused: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            body_count: 10_000,
            dt: 1.0 / 60.0,
            steps: None,
            seed: None,
            integrator: DEFAULT_INTEGRATOR.to_string(),
            execution: ExecutionStrategy::default(),
            start_paused: false,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file
    /// doesn't exist or can't be parsed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("Failed to load config file {}: {}. Using defaults.", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a file, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Per-user configuration file location, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "gravitree")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Defaults, overlaid by the user config file, overlaid by `GRAVITREE__*`
    /// environment variables. Any failure falls back to defaults.
    pub fn load_from_user_config() -> Self {
        match Self::load_layered(Self::user_config_path().as_deref()) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load user configuration: {}. Using defaults.", err);
                Self::default()
            }
        }
    }

    /// Layers an optional file and the environment over the defaults.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let layered = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(layered.try_deserialize()?)
    }
}
