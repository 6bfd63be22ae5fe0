//! Monte Carlo bankroll simulation.
//!
//! Repeats the same bet under a staking policy across many independent
//! paths and summarizes the terminal distribution, drawdowns, and ruin
//! frequency.
//!
//! Determinism: a master RNG seeded from `seed` draws one sub-seed per
//! path up front, and each path runs on its own RNG seeded from its
//! sub-seed. Results are bit-identical for a given seed regardless of
//! how many threads the path batch is spread over.

pub mod path;
pub mod stats;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::InvalidInput;
use crate::policy::StakePolicy;
use crate::sim::path::{simulate_path, BankrollPath};
use crate::sim::stats::{summarize, SimulationSummary};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Inputs for one simulation batch.
#[derive(Debug, Clone)]
pub struct SimParams {
    /// Number of bets per path.
    pub step_count: usize,
    /// Number of independent paths.
    pub path_count: usize,
    pub starting_bankroll: f64,
    /// Probability each bet wins, in [0, 1].
    pub win_probability: f64,
    pub decimal_odds: f64,
    /// Master seed for the whole batch.
    pub seed: u64,
    /// Bankroll at or below this is absorbed to zero. Must be below
    /// the starting bankroll.
    pub ruin_threshold: f64,
    /// Percentile curves to track across steps, each in [0, 100].
    pub trajectory_percentiles: Vec<f64>,
}

impl SimParams {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.step_count == 0 {
            return Err(InvalidInput::StepCount);
        }
        if self.path_count == 0 {
            return Err(InvalidInput::PathCount);
        }
        if !(self.starting_bankroll.is_finite() && self.starting_bankroll > 0.0) {
            return Err(InvalidInput::StartingBankroll(self.starting_bankroll));
        }
        if !(self.win_probability.is_finite() && (0.0..=1.0).contains(&self.win_probability)) {
            return Err(InvalidInput::WinProbability(self.win_probability));
        }
        if !(self.decimal_odds.is_finite() && self.decimal_odds > 1.0) {
            return Err(InvalidInput::DecimalOdds(self.decimal_odds));
        }
        if !(self.ruin_threshold.is_finite()
            && self.ruin_threshold >= 0.0
            && self.ruin_threshold < self.starting_bankroll)
        {
            return Err(InvalidInput::RuinThreshold(self.ruin_threshold));
        }
        for &pct in &self.trajectory_percentiles {
            if !(pct.is_finite() && (0.0..=100.0).contains(&pct)) {
                return Err(InvalidInput::Percentile(pct));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Runs batches of bankroll paths for one set of parameters.
pub struct PathSimulator {
    params: SimParams,
}

impl PathSimulator {
    pub fn new(params: SimParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Run the full batch and summarize it.
    pub fn run<P: StakePolicy + Sync>(&self, policy: &P) -> Result<SimulationSummary, InvalidInput> {
        let paths = self.run_paths(policy)?;
        let summary = summarize(&paths, &self.params);
        info!(
            paths = summary.path_count,
            steps = summary.step_count,
            ruin_probability = format!("{:.4}", summary.ruin_probability),
            mean_terminal = format!("{:.2}", summary.terminal.mean),
            "Simulation complete"
        );
        Ok(summary)
    }

    /// Run the batch and return the raw paths in seed order.
    pub fn run_paths<P: StakePolicy + Sync>(
        &self,
        policy: &P,
    ) -> Result<Vec<BankrollPath>, InvalidInput> {
        self.params.validate()?;

        let mut master = StdRng::seed_from_u64(self.params.seed);
        let seeds: Vec<u64> = (0..self.params.path_count).map(|_| master.gen()).collect();

        debug!(
            path_count = self.params.path_count,
            step_count = self.params.step_count,
            seed = self.params.seed,
            "Dispatching paths"
        );

        let paths: Vec<BankrollPath> = seeds
            .into_par_iter()
            .map(|sub_seed| {
                let mut rng = StdRng::seed_from_u64(sub_seed);
                simulate_path(policy, &self.params, &mut rng)
            })
            .collect();

        Ok(paths)
    }
}
