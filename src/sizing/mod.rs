//! Risk-adjusted stake sizing.
//!
//! Turns an edge estimate into a recommended bankroll fraction: raw
//! Kelly, shrunk by the edge-aware scale and the uncertainty penalty,
//! multiplied down to fractional Kelly and clamped at the exposure cap.

pub mod kelly;
pub mod regime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidInput;
use crate::ev::EdgeEstimate;
use crate::sizing::regime::{RegimeThresholds, RiskRegime};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Risk limits applied on top of the raw Kelly fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    /// Fraction of full Kelly to deploy.
    pub kelly_multiplier: f64,
    /// Hard cap on the stake as a fraction of bankroll.
    pub max_fraction: f64,
    /// Peak-to-trough drawdown at which staking stops entirely.
    pub max_drawdown_tolerance: f64,
    /// Edges at or below this are treated as noise and not bet.
    pub min_edge: f64,
    /// Edge at which the edge-aware scale reaches full size.
    pub full_scale_edge: f64,
    /// Weight of the uncertainty penalty; 0 disables it.
    pub uncertainty_weight: f64,
    /// Stake-fraction boundaries for regime classification.
    pub regime: RegimeThresholds,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            kelly_multiplier: 0.5,        // Half-Kelly
            max_fraction: 0.10,           // Never more than 10% of bankroll
            max_drawdown_tolerance: 0.30, // Stop staking at 30% drawdown
            min_edge: 0.01,               // 1% noise floor
            full_scale_edge: 0.05,        // Full size from 5% edge
            uncertainty_weight: 10.0,
            regime: RegimeThresholds::default(),
        }
    }
}

impl RiskLimits {
    fn validate(&self) -> Result<(), InvalidInput> {
        let in_unit = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
        if !in_unit(self.kelly_multiplier) {
            return Err(InvalidInput::Limits(format!(
                "kelly_multiplier must lie within (0, 1], got {}",
                self.kelly_multiplier
            )));
        }
        if !in_unit(self.max_fraction) {
            return Err(InvalidInput::Limits(format!(
                "max_fraction must lie within (0, 1], got {}",
                self.max_fraction
            )));
        }
        if !in_unit(self.max_drawdown_tolerance) {
            return Err(InvalidInput::Limits(format!(
                "max_drawdown_tolerance must lie within (0, 1], got {}",
                self.max_drawdown_tolerance
            )));
        }
        if !(self.min_edge.is_finite() && self.min_edge >= 0.0) {
            return Err(InvalidInput::Limits(format!(
                "min_edge must be finite and non-negative, got {}",
                self.min_edge
            )));
        }
        if !(self.full_scale_edge.is_finite() && self.full_scale_edge > self.min_edge) {
            return Err(InvalidInput::Limits(format!(
                "full_scale_edge must exceed min_edge, got {} vs {}",
                self.full_scale_edge, self.min_edge
            )));
        }
        if !(self.uncertainty_weight.is_finite() && self.uncertainty_weight >= 0.0) {
            return Err(InvalidInput::Limits(format!(
                "uncertainty_weight must be finite and non-negative, got {}",
                self.uncertainty_weight
            )));
        }
        self.regime.validate()
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// The sizing engine's verdict for one bet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StakeDecision {
    /// Raw Kelly fraction before any risk adjustment.
    pub kelly_fraction: f64,
    /// Final recommended fraction of bankroll to stake.
    pub stake_fraction: f64,
    pub risk_regime: RiskRegime,
}

impl StakeDecision {
    /// Currency amount to stake from the given bankroll.
    pub fn stake_amount(&self, bankroll: f64) -> f64 {
        self.stake_fraction * bankroll
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Applies the configured risk limits to edge estimates.
pub struct SizingEngine {
    limits: RiskLimits,
}

impl SizingEngine {
    pub fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Size one bet.
    ///
    /// The stake fraction is raw Kelly shrunk by the edge-aware scale
    /// and the uncertainty penalty, multiplied by `kelly_multiplier`
    /// and clamped to `[0, max_fraction]`. Non-positive and sub-noise
    /// edges yield a zero stake with regime `None`.
    pub fn decide(
        &self,
        estimate: &EdgeEstimate,
        uncertainty: f64,
    ) -> Result<StakeDecision, InvalidInput> {
        self.limits.validate()?;
        if !(estimate.decimal_odds.is_finite() && estimate.decimal_odds > 1.0) {
            return Err(InvalidInput::DecimalOdds(estimate.decimal_odds));
        }
        if !(estimate.true_probability.is_finite()
            && estimate.true_probability > 0.0
            && estimate.true_probability < 1.0)
        {
            return Err(InvalidInput::Probability(estimate.true_probability));
        }
        if !estimate.edge.is_finite() {
            return Err(InvalidInput::Edge(estimate.edge));
        }
        if !(uncertainty.is_finite() && uncertainty >= 0.0) {
            return Err(InvalidInput::Uncertainty(uncertainty));
        }

        let raw = kelly::kelly_fraction(estimate.edge, estimate.decimal_odds);
        let scale =
            kelly::edge_scale(estimate.edge, self.limits.min_edge, self.limits.full_scale_edge);
        let penalty = kelly::uncertainty_penalty(uncertainty, self.limits.uncertainty_weight);

        let stake_fraction = (raw * scale * penalty * self.limits.kelly_multiplier)
            .clamp(0.0, self.limits.max_fraction);
        let risk_regime = regime::classify(stake_fraction, &self.limits.regime);

        debug!(
            edge = format!("{:.4}", estimate.edge),
            raw_kelly = format!("{:.4}", raw),
            scale = format!("{:.3}", scale),
            penalty = format!("{:.3}", penalty),
            stake_fraction = format!("{:.4}", stake_fraction),
            regime = %risk_regime,
            "Sized bet"
        );

        Ok(StakeDecision {
            kelly_fraction: raw,
            stake_fraction,
            risk_regime,
        })
    }
}
