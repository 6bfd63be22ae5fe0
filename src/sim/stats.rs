//! Aggregation of simulated paths into a reportable summary.

use serde::Serialize;

use crate::sim::path::BankrollPath;
use crate::sim::SimParams;

/// Percentiles every distribution summary records.
pub const SUMMARY_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// Summary statistics for one scalar distribution.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub mean: f64,
    /// Sample standard deviation; 0 for fewer than two values.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// `(percentile, value)` pairs at [`SUMMARY_PERCENTILES`].
    pub percentiles: Vec<(f64, f64)>,
}

impl DistributionSummary {
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = values.len();
        let mean = if n == 0 {
            0.0
        } else {
            values.iter().sum::<f64>() / n as f64
        };
        let std_dev = if n < 2 {
            0.0
        } else {
            let variance = values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1) as f64;
            variance.sqrt()
        };

        let percentiles = SUMMARY_PERCENTILES
            .iter()
            .map(|&pct| (pct, percentile_of_sorted(&values, pct)))
            .collect();

        Self {
            mean,
            std_dev,
            min: values.first().copied().unwrap_or(0.0),
            max: values.last().copied().unwrap_or(0.0),
            percentiles,
        }
    }

    /// Value at one of the recorded percentiles; 0 if not recorded.
    pub fn percentile(&self, pct: f64) -> f64 {
        self.percentiles
            .iter()
            .find(|(p, _)| *p == pct)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}

/// Nearest-rank percentile of an ascending-sorted slice.
fn percentile_of_sorted(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (pct / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

// ---------------------------------------------------------------------------
// Simulation summary
// ---------------------------------------------------------------------------

/// One percentile of the bankroll distribution tracked across steps.
#[derive(Debug, Clone, Serialize)]
pub struct PercentileTrajectory {
    pub percentile: f64,
    /// Bankroll at this percentile after each step, starting value first.
    pub values: Vec<f64>,
}

/// Everything the simulator reports about a batch of paths.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub path_count: usize,
    pub step_count: usize,
    pub starting_bankroll: f64,
    /// Share of paths absorbed at zero.
    pub ruin_probability: f64,
    /// Share of paths finishing above the starting bankroll.
    pub probability_of_profit: f64,
    pub terminal: DistributionSummary,
    pub max_drawdown: DistributionSummary,
    pub trajectories: Vec<PercentileTrajectory>,
}

pub(crate) fn summarize(paths: &[BankrollPath], params: &SimParams) -> SimulationSummary {
    let path_count = paths.len();
    let ruined = paths.iter().filter(|p| p.is_ruined()).count();
    let profitable = paths
        .iter()
        .filter(|p| p.terminal() > params.starting_bankroll)
        .count();

    let terminal = DistributionSummary::from_values(paths.iter().map(|p| p.terminal()).collect());
    let max_drawdown =
        DistributionSummary::from_values(paths.iter().map(|p| p.max_drawdown).collect());

    SimulationSummary {
        path_count,
        step_count: params.step_count,
        starting_bankroll: params.starting_bankroll,
        ruin_probability: ruined as f64 / path_count as f64,
        probability_of_profit: profitable as f64 / path_count as f64,
        terminal,
        max_drawdown,
        trajectories: percentile_trajectories(
            paths,
            &params.trajectory_percentiles,
            params.step_count,
        ),
    }
}

/// Per-step percentile curves across the whole batch.
///
/// Sorts each step's bankroll column once and reads every requested
/// percentile from it.
fn percentile_trajectories(
    paths: &[BankrollPath],
    percentiles: &[f64],
    step_count: usize,
) -> Vec<PercentileTrajectory> {
    if percentiles.is_empty() || paths.is_empty() {
        return Vec::new();
    }

    let mut curves: Vec<PercentileTrajectory> = percentiles
        .iter()
        .map(|&percentile| PercentileTrajectory {
            percentile,
            values: Vec::with_capacity(step_count + 1),
        })
        .collect();

    let mut column = Vec::with_capacity(paths.len());
    for step in 0..=step_count {
        column.clear();
        column.extend(paths.iter().map(|path| path.values[step]));
        column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        for curve in curves.iter_mut() {
            curve.values.push(percentile_of_sorted(&column, curve.percentile));
        }
    }
    curves
}
