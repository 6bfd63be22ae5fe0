//! Staking policies for the bankroll simulator.
//!
//! A policy maps the current bankroll state to the stake for the next
//! bet. The simulator clamps whatever a policy returns to what the
//! bankroll can actually cover, so policies stay simple.

use crate::error::InvalidInput;
use crate::ev::EdgeEstimate;
use crate::sizing::{SizingEngine, StakeDecision};

/// Stake for the next bet given the current and peak bankroll.
pub trait StakePolicy {
    fn stake(&self, bankroll: f64, peak: f64) -> f64;
}

/// Any closure of the right shape is a policy.
impl<F: Fn(f64, f64) -> f64> StakePolicy for F {
    fn stake(&self, bankroll: f64, peak: f64) -> f64 {
        self(bankroll, peak)
    }
}

// ---------------------------------------------------------------------------
// Basic policies
// ---------------------------------------------------------------------------

/// Same currency amount every bet.
#[derive(Debug, Clone, Copy)]
pub struct FlatStake {
    amount: f64,
}

impl FlatStake {
    pub fn new(amount: f64) -> Result<Self, InvalidInput> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(InvalidInput::StakeAmount(amount));
        }
        Ok(Self { amount })
    }
}

impl StakePolicy for FlatStake {
    fn stake(&self, _bankroll: f64, _peak: f64) -> f64 {
        self.amount
    }
}

/// Same fraction of the current bankroll every bet.
#[derive(Debug, Clone, Copy)]
pub struct FixedFraction {
    fraction: f64,
}

impl FixedFraction {
    pub fn new(fraction: f64) -> Result<Self, InvalidInput> {
        if !(fraction.is_finite() && (0.0..=1.0).contains(&fraction)) {
            return Err(InvalidInput::Fraction(fraction));
        }
        Ok(Self { fraction })
    }
}

impl StakePolicy for FixedFraction {
    fn stake(&self, bankroll: f64, _peak: f64) -> f64 {
        self.fraction * bankroll
    }
}

/// Stakes the sizing engine's recommended fraction of the live bankroll.
///
/// The decision is taken once at construction: for a fixed estimate and
/// uncertainty the engine output never changes, only the bankroll it is
/// applied to does.
#[derive(Debug, Clone, Copy)]
pub struct KellyStake {
    decision: StakeDecision,
}

impl KellyStake {
    pub fn new(
        engine: &SizingEngine,
        estimate: &EdgeEstimate,
        uncertainty: f64,
    ) -> Result<Self, InvalidInput> {
        let decision = engine.decide(estimate, uncertainty)?;
        Ok(Self { decision })
    }

    pub fn decision(&self) -> &StakeDecision {
        &self.decision
    }
}

impl StakePolicy for KellyStake {
    fn stake(&self, bankroll: f64, _peak: f64) -> f64 {
        self.decision.stake_amount(bankroll)
    }
}

// ---------------------------------------------------------------------------
// Combinators
// ---------------------------------------------------------------------------

/// Winds the inner policy down linearly as drawdown approaches the
/// tolerance, reaching zero stake at the tolerance itself.
#[derive(Debug, Clone, Copy)]
pub struct DrawdownGuard<P> {
    inner: P,
    tolerance: f64,
}

impl<P: StakePolicy> DrawdownGuard<P> {
    pub fn new(inner: P, tolerance: f64) -> Result<Self, InvalidInput> {
        if !(tolerance.is_finite() && tolerance > 0.0 && tolerance <= 1.0) {
            return Err(InvalidInput::Limits(format!(
                "drawdown tolerance must lie within (0, 1], got {}",
                tolerance
            )));
        }
        Ok(Self { inner, tolerance })
    }
}

impl<P: StakePolicy> StakePolicy for DrawdownGuard<P> {
    fn stake(&self, bankroll: f64, peak: f64) -> f64 {
        let drawdown = if peak > 0.0 {
            (peak - bankroll) / peak
        } else {
            0.0
        };
        if drawdown >= self.tolerance {
            return 0.0;
        }
        self.inner.stake(bankroll, peak) * (1.0 - drawdown / self.tolerance)
    }
}

/// Rounds stakes below the venue minimum up, but leaves no-bets alone.
#[derive(Debug, Clone, Copy)]
pub struct WithMinimum<P> {
    inner: P,
    min_stake: f64,
}

impl<P: StakePolicy> WithMinimum<P> {
    pub fn new(inner: P, min_stake: f64) -> Result<Self, InvalidInput> {
        if !(min_stake.is_finite() && min_stake >= 0.0) {
            return Err(InvalidInput::StakeAmount(min_stake));
        }
        Ok(Self { inner, min_stake })
    }
}

impl<P: StakePolicy> StakePolicy for WithMinimum<P> {
    fn stake(&self, bankroll: f64, peak: f64) -> f64 {
        let stake = self.inner.stake(bankroll, peak);
        if stake <= 0.0 {
            0.0
        } else {
            stake.max(self.min_stake)
        }
    }
}

/// Caps stakes at the venue maximum.
#[derive(Debug, Clone, Copy)]
pub struct WithCap<P> {
    inner: P,
    max_stake: f64,
}

impl<P: StakePolicy> WithCap<P> {
    pub fn new(inner: P, max_stake: f64) -> Result<Self, InvalidInput> {
        if !(max_stake.is_finite() && max_stake >= 0.0) {
            return Err(InvalidInput::StakeAmount(max_stake));
        }
        Ok(Self { inner, max_stake })
    }
}

impl<P: StakePolicy> StakePolicy for WithCap<P> {
    fn stake(&self, bankroll: f64, peak: f64) -> f64 {
        self.inner.stake(bankroll, peak).min(self.max_stake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::OddsQuote;
    use crate::sizing::RiskLimits;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_stake_ignores_bankroll() {
        let policy = FlatStake::new(25.0).unwrap();
        assert_eq!(policy.stake(1000.0, 1000.0), 25.0);
        assert_eq!(policy.stake(10.0, 1000.0), 25.0);
    }

    #[test]
    fn test_flat_stake_rejects_negative() {
        assert_eq!(
            FlatStake::new(-5.0).unwrap_err(),
            InvalidInput::StakeAmount(-5.0)
        );
    }

    #[test]
    fn test_fixed_fraction_tracks_bankroll() {
        let policy = FixedFraction::new(0.02).unwrap();
        assert_relative_eq!(policy.stake(1000.0, 1000.0), 20.0);
        assert_relative_eq!(policy.stake(500.0, 1000.0), 10.0);
    }

    #[test]
    fn test_fixed_fraction_bounds() {
        assert!(FixedFraction::new(1.0).is_ok());
        assert_eq!(
            FixedFraction::new(1.5).unwrap_err(),
            InvalidInput::Fraction(1.5)
        );
        assert_eq!(
            FixedFraction::new(-0.1).unwrap_err(),
            InvalidInput::Fraction(-0.1)
        );
    }

    #[test]
    fn test_closure_policy() {
        let policy = |bankroll: f64, _peak: f64| bankroll * 0.01;
        assert_relative_eq!(policy.stake(2000.0, 2000.0), 20.0);
    }

    #[test]
    fn test_kelly_stake_uses_engine_decision() {
        let engine = SizingEngine::new(RiskLimits::default());
        let quote = OddsQuote::from_american(-110).unwrap();
        let estimate = EdgeEstimate::new(0.55, quote).unwrap();
        let policy = KellyStake::new(&engine, &estimate, 0.0).unwrap();

        // Half-Kelly on a ~5% edge: ~2.75% of bankroll.
        assert_relative_eq!(policy.stake(1000.0, 1000.0), 27.5, epsilon = 0.1);
        assert_relative_eq!(
            policy.decision().stake_fraction,
            0.0275,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_drawdown_guard_winds_down() {
        let policy = DrawdownGuard::new(FlatStake::new(10.0).unwrap(), 0.3).unwrap();
        assert_relative_eq!(policy.stake(1000.0, 1000.0), 10.0);
        assert_relative_eq!(policy.stake(850.0, 1000.0), 5.0); // 15% of 30% gone
        assert_relative_eq!(policy.stake(700.0, 1000.0), 0.0);
        assert_relative_eq!(policy.stake(500.0, 1000.0), 0.0);
    }

    #[test]
    fn test_drawdown_guard_rejects_bad_tolerance() {
        assert!(DrawdownGuard::new(FlatStake::new(10.0).unwrap(), 0.0).is_err());
        assert!(DrawdownGuard::new(FlatStake::new(10.0).unwrap(), 1.5).is_err());
    }

    #[test]
    fn test_with_minimum_preserves_no_bet() {
        let policy = WithMinimum::new(FlatStake::new(0.0).unwrap(), 5.0).unwrap();
        assert_eq!(policy.stake(1000.0, 1000.0), 0.0);

        let policy = WithMinimum::new(FlatStake::new(2.0).unwrap(), 5.0).unwrap();
        assert_eq!(policy.stake(1000.0, 1000.0), 5.0);
    }

    #[test]
    fn test_with_cap() {
        let policy = WithCap::new(FixedFraction::new(0.10).unwrap(), 50.0).unwrap();
        assert_relative_eq!(policy.stake(1000.0, 1000.0), 50.0);
        assert_relative_eq!(policy.stake(200.0, 1000.0), 20.0);
    }
}
