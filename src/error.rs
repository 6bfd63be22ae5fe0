//! Input validation errors.
//!
//! Every failure in this crate is a caller contract violation, detected
//! at the start of an operation before any computation or randomness is
//! consumed. There are no recoverable internal failure modes.

use thiserror::Error;

/// Precondition violation on an input to the sizing engine or simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("decimal odds must be finite and greater than 1.0, got {0}")]
    DecimalOdds(f64),

    #[error("american odds of zero are undefined")]
    ZeroAmericanOdds,

    #[error("probability must lie strictly between 0 and 1, got {0}")]
    Probability(f64),

    #[error("win probability must lie within [0, 1], got {0}")]
    WinProbability(f64),

    #[error("uncertainty must be finite and non-negative, got {0}")]
    Uncertainty(f64),

    #[error("edge must be a finite number, got {0}")]
    Edge(f64),

    #[error("stake fraction must lie within [0, 1], got {0}")]
    Fraction(f64),

    #[error("stake amount must be finite and non-negative, got {0}")]
    StakeAmount(f64),

    #[error("step count must be at least 1")]
    StepCount,

    #[error("path count must be at least 1")]
    PathCount,

    #[error("starting bankroll must be finite and positive, got {0}")]
    StartingBankroll(f64),

    #[error("ruin threshold must lie within [0, starting bankroll), got {0}")]
    RuinThreshold(f64),

    #[error("trajectory percentile must lie within [0, 100], got {0}")]
    Percentile(f64),

    #[error("invalid risk limits: {0}")]
    Limits(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = InvalidInput::DecimalOdds(1.0);
        assert_eq!(
            format!("{e}"),
            "decimal odds must be finite and greater than 1.0, got 1"
        );

        let e = InvalidInput::WinProbability(1.5);
        assert_eq!(format!("{e}"), "win probability must lie within [0, 1], got 1.5");

        let e = InvalidInput::Limits("kelly_multiplier must lie within (0, 1], got 0".into());
        assert_eq!(
            format!("{e}"),
            "invalid risk limits: kelly_multiplier must lie within (0, 1], got 0"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(InvalidInput::StepCount, InvalidInput::StepCount);
        assert_ne!(
            InvalidInput::Probability(0.0),
            InvalidInput::Probability(1.0)
        );
    }
}
