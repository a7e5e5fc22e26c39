//! Service configuration
//!
//! Settings come from an optional TOML file layered under environment
//! variables prefixed with `CLIENTE_PREDICT`, e.g.
//! `CLIENTE_PREDICT__SERVER__BIND=127.0.0.1:9000`.

use crate::error::Result;
use crate::model::{DEFAULT_GOAL_LINE, DEFAULT_MAX_GOALS};
use serde::Deserialize;
use std::path::PathBuf;

const ENV_PREFIX: &str = "CLIENTE_PREDICT";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub verdict: VerdictConfig,
}

impl Config {
    /// Load configuration from `path` (if it exists) and the environment
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Historical results table
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
    #[serde(default = "default_home_team_column")]
    pub home_team_column: String,
    #[serde(default = "default_away_team_column")]
    pub away_team_column: String,
    #[serde(default = "default_home_goals_column")]
    pub home_goals_column: String,
    #[serde(default = "default_away_goals_column")]
    pub away_goals_column: String,
}

impl DatasetConfig {
    /// Dataset path with `~` and environment variables expanded
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.path))
    }
}

fn default_dataset_path() -> String {
    "FMEL_Dataset.csv".to_string()
}

fn default_home_team_column() -> String {
    "localTeam".to_string()
}

fn default_away_team_column() -> String {
    "visitorTeam".to_string()
}

fn default_home_goals_column() -> String {
    "localGoals".to_string()
}

fn default_away_goals_column() -> String {
    "visitorGoals".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            home_team_column: default_home_team_column(),
            away_team_column: default_away_team_column(),
            home_goals_column: default_home_goals_column(),
            away_goals_column: default_away_goals_column(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory holding `index.html` and the UI bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl ServerConfig {
    pub fn resolved_static_dir(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.static_dir))
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

/// Score grid settings for the Poisson engine
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Highest goal count per side kept in the grid
    #[serde(default = "default_max_goals")]
    pub max_goals: u8,
    /// Goal line used by the `over25` market
    #[serde(default = "default_over_under_threshold")]
    pub over_under_threshold: f64,
}

fn default_max_goals() -> u8 {
    DEFAULT_MAX_GOALS
}

fn default_over_under_threshold() -> f64 {
    DEFAULT_GOAL_LINE
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_goals: default_max_goals(),
            over_under_threshold: default_over_under_threshold(),
        }
    }
}

/// Probability cut-offs for the betting verdict
#[derive(Debug, Clone, Deserialize)]
pub struct VerdictConfig {
    #[serde(default = "default_favour_threshold")]
    pub favour_threshold: f64,
    #[serde(default = "default_against_threshold")]
    pub against_threshold: f64,
}

fn default_favour_threshold() -> f64 {
    0.52
}

fn default_against_threshold() -> f64 {
    0.40
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            favour_threshold: default_favour_threshold(),
            against_threshold: default_against_threshold(),
        }
    }
}

fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
