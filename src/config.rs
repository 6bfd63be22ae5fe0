//! Configuration loading from TOML.
//!
//! Every field has a default, so a missing or partial file still
//! yields a runnable configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::sim::stats::SUMMARY_PERCENTILES;
use crate::sizing::RiskLimits;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scenario: ScenarioConfig,
    pub limits: RiskLimits,
    pub simulation: SimulationConfig,
}

/// The bet under evaluation.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub american_odds: i32,
    /// Estimated win probability, in (0, 1).
    pub true_probability: f64,
    /// Standard-error style noise on the probability estimate.
    pub uncertainty: f64,
    /// Stake used for the expected-value readout.
    pub stake: f64,
    pub bankroll: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            american_odds: -110,
            true_probability: 0.55,
            uncertainty: 0.0,
            stake: 100.0,
            bankroll: 1000.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub step_count: usize,
    pub path_count: usize,
    pub seed: u64,
    /// Bankroll at or below this counts as ruin.
    pub ruin_threshold: f64,
    pub trajectory_percentiles: Vec<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_count: 1000,
            path_count: 10_000,
            seed: 42,
            ruin_threshold: 0.0,
            trajectory_percentiles: SUMMARY_PERCENTILES.to_vec(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load from a TOML file if it exists, defaults otherwise.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
