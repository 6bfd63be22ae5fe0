//! Odds conversion and quote normalization.
//!
//! Converts American-style odds into decimal odds and derives implied
//! probabilities. Quotes are immutable values created per evaluation.

use std::fmt;

use serde::Serialize;

use crate::error::InvalidInput;

/// A normalized odds quote. The decimal price always exceeds 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OddsQuote {
    decimal: f64,
}

impl OddsQuote {
    /// Build a quote from decimal (European) odds.
    pub fn from_decimal(decimal: f64) -> Result<Self, InvalidInput> {
        if !decimal.is_finite() || decimal <= 1.0 {
            return Err(InvalidInput::DecimalOdds(decimal));
        }
        Ok(Self { decimal })
    }

    /// Build a quote from American odds.
    ///
    /// Negative odds quote the amount risked to win 100
    /// (decimal = 100/|a| + 1); positive odds quote the amount won per
    /// 100 risked (decimal = a/100 + 1). Zero is undefined.
    pub fn from_american(american: i32) -> Result<Self, InvalidInput> {
        if american == 0 {
            return Err(InvalidInput::ZeroAmericanOdds);
        }
        let decimal = if american < 0 {
            100.0 / f64::from(american.unsigned_abs()) + 1.0
        } else {
            f64::from(american) / 100.0 + 1.0
        };
        Self::from_decimal(decimal)
    }

    pub fn decimal(&self) -> f64 {
        self.decimal
    }

    /// Probability at which these odds are exactly fair (1 / decimal).
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.decimal
    }

    /// Minimum win probability needed to break even at these odds.
    pub fn break_even_probability(&self) -> f64 {
        self.implied_probability()
    }

    /// Profit (excluding the returned stake) on a winning bet of `stake`.
    pub fn profit_on(&self, stake: f64) -> f64 {
        stake * (self.decimal - 1.0)
    }
}

impl fmt::Display for OddsQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_american_negative() {
        let quote = OddsQuote::from_american(-110).unwrap();
        assert_relative_eq!(quote.decimal(), 1.909090909090909, epsilon = 1e-12);
        assert_relative_eq!(quote.implied_probability(), 110.0 / 210.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_american_positive() {
        let quote = OddsQuote::from_american(150).unwrap();
        assert_relative_eq!(quote.decimal(), 2.5);
        assert_relative_eq!(quote.implied_probability(), 0.4);
    }

    #[test]
    fn test_from_american_zero_rejected() {
        assert_eq!(
            OddsQuote::from_american(0).unwrap_err(),
            InvalidInput::ZeroAmericanOdds
        );
    }

    #[test]
    fn test_from_decimal_rejects_non_payout_odds() {
        assert!(OddsQuote::from_decimal(1.0).is_err());
        assert!(OddsQuote::from_decimal(0.5).is_err());
        assert!(OddsQuote::from_decimal(f64::NAN).is_err());
        assert!(OddsQuote::from_decimal(f64::INFINITY).is_err());
        assert!(OddsQuote::from_decimal(1.0001).is_ok());
    }

    #[test]
    fn test_profit_on_stake() {
        let quote = OddsQuote::from_american(-110).unwrap();
        // Risk 110 to win 100
        assert_relative_eq!(quote.profit_on(110.0), 100.0, epsilon = 1e-9);

        let quote = OddsQuote::from_american(200).unwrap();
        assert_relative_eq!(quote.profit_on(50.0), 100.0);
    }

    #[test]
    fn test_break_even_matches_implied() {
        let quote = OddsQuote::from_decimal(2.2).unwrap();
        assert_eq!(quote.break_even_probability(), quote.implied_probability());
    }

    #[test]
    fn test_display() {
        let quote = OddsQuote::from_american(-110).unwrap();
        assert_eq!(format!("{quote}"), "1.909");
    }
}
