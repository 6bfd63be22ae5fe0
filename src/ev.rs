//! Expected-value analysis of a proposed wager.
//!
//! Compares a caller-supplied true-probability estimate against the
//! market's implied probability and expresses the difference as edge:
//! expected profit per unit staked.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::InvalidInput;
use crate::odds::OddsQuote;

// ---------------------------------------------------------------------------
// Edge estimate
// ---------------------------------------------------------------------------

/// Edge on a wager at quoted odds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EdgeEstimate {
    /// Caller-supplied true win probability.
    pub true_probability: f64,
    /// Probability implied by the market price.
    pub implied_probability: f64,
    pub decimal_odds: f64,
    /// p * decimal_odds - 1: expected profit per unit staked.
    pub edge: f64,
}

impl EdgeEstimate {
    /// Compute the edge for an estimated win probability at the quoted odds.
    pub fn new(true_probability: f64, quote: OddsQuote) -> Result<Self, InvalidInput> {
        if !true_probability.is_finite() || true_probability <= 0.0 || true_probability >= 1.0 {
            return Err(InvalidInput::Probability(true_probability));
        }
        Ok(Self {
            true_probability,
            implied_probability: quote.implied_probability(),
            decimal_odds: quote.decimal(),
            edge: true_probability * quote.decimal() - 1.0,
        })
    }

    /// Expected profit for a given stake.
    pub fn expected_value(&self, stake: f64) -> f64 {
        stake * self.edge
    }
}

// ---------------------------------------------------------------------------
// Bet evaluation
// ---------------------------------------------------------------------------

/// Qualitative label for an edge, used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BetQuality {
    /// Edge above 5%.
    Strong,
    /// Positive edge up to 5%.
    Positive,
    /// Edge within 1% of zero.
    Breakeven,
    Negative,
}

impl BetQuality {
    /// Classify an edge into quality bands.
    pub fn classify(edge: f64) -> Self {
        if edge > 0.05 {
            BetQuality::Strong
        } else if edge > 0.0 {
            BetQuality::Positive
        } else if edge.abs() < 0.01 {
            BetQuality::Breakeven
        } else {
            BetQuality::Negative
        }
    }
}

impl fmt::Display for BetQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BetQuality::Strong => "STRONG POSITIVE EDGE",
            BetQuality::Positive => "SMALL POSITIVE EDGE",
            BetQuality::Breakeven => "ROUGHLY BREAKEVEN",
            BetQuality::Negative => "NEGATIVE EDGE",
        };
        write!(f, "{label}")
    }
}

/// Full evaluation of a proposed wager at a fixed stake.
#[derive(Debug, Clone, Serialize)]
pub struct BetEvaluation {
    pub true_probability: f64,
    pub implied_probability: f64,
    pub edge: f64,
    pub stake: f64,
    pub expected_value: f64,
    pub quality: BetQuality,
}

/// Evaluate a wager: edge, expected value for the stake, quality label.
pub fn evaluate(
    true_probability: f64,
    quote: OddsQuote,
    stake: f64,
) -> Result<BetEvaluation, InvalidInput> {
    if !stake.is_finite() || stake < 0.0 {
        return Err(InvalidInput::StakeAmount(stake));
    }
    let estimate = EdgeEstimate::new(true_probability, quote)?;
    let expected_value = estimate.expected_value(stake);

    debug!(
        edge = format!("{:.2}%", estimate.edge * 100.0),
        ev = format!("{expected_value:.2}"),
        "Wager evaluated"
    );

    Ok(BetEvaluation {
        true_probability,
        implied_probability: estimate.implied_probability,
        edge: estimate.edge,
        stake,
        expected_value,
        quality: BetQuality::classify(estimate.edge),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
