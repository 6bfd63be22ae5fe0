//! Risk regime classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Stake-fraction boundaries separating the risk regimes.
///
/// Classification is monotone in the stake fraction: raising the stake
/// can only move the regime toward `High`, never back toward `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeThresholds {
    /// Largest stake fraction still classified as `Low`.
    pub low_max: f64,
    /// Largest stake fraction still classified as `Moderate`.
    pub moderate_max: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            low_max: 0.01,      // <= 1% of bankroll
            moderate_max: 0.05, // <= 5% of bankroll
        }
    }
}

impl RegimeThresholds {
    pub(crate) fn validate(&self) -> Result<(), InvalidInput> {
        if !(self.low_max > 0.0 && self.moderate_max > self.low_max) {
            return Err(InvalidInput::Limits(format!(
                "regime thresholds must satisfy 0 < low_max < moderate_max, got {} and {}",
                self.low_max, self.moderate_max
            )));
        }
        Ok(())
    }
}

/// How aggressive a recommended stake is relative to the bankroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskRegime {
    /// No capital at risk.
    None,
    Low,
    Moderate,
    High,
}

/// Classify a final stake fraction against the configured thresholds.
pub fn classify(stake_fraction: f64, thresholds: &RegimeThresholds) -> RiskRegime {
    if stake_fraction <= 0.0 {
        RiskRegime::None
    } else if stake_fraction <= thresholds.low_max {
        RiskRegime::Low
    } else if stake_fraction <= thresholds.moderate_max {
        RiskRegime::Moderate
    } else {
        RiskRegime::High
    }
}

impl fmt::Display for RiskRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskRegime::None => "NO BET",
            RiskRegime::Low => "LOW RISK",
            RiskRegime::Moderate => "MODERATE RISK",
            RiskRegime::High => "HIGH RISK",
        };
        write!(f, "{}", label)
    }
}
