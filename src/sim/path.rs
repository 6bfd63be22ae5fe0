//! Single bankroll trajectory.

use rand::rngs::StdRng;
use rand::Rng;

use crate::policy::StakePolicy;
use crate::sim::SimParams;

/// One simulated bankroll trajectory, including the starting value.
#[derive(Debug, Clone, PartialEq)]
pub struct BankrollPath {
    /// Bankroll after each step; `values[0]` is the starting bankroll.
    pub values: Vec<f64>,
    /// Highest bankroll seen along the path.
    pub peak: f64,
    /// Worst peak-to-trough drawdown along the path, in [0, 1].
    pub max_drawdown: f64,
}

impl BankrollPath {
    pub fn terminal(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// A ruined path sits at exactly zero; the simulator never leaves a
    /// positive-but-absorbed bankroll behind.
    pub fn is_ruined(&self) -> bool {
        self.terminal() == 0.0
    }
}

/// Simulate one path of `step_count` bets.
///
/// Each step asks the policy for a stake, clamps it to what the
/// bankroll can cover, and resolves the bet against `win_probability`.
/// A bankroll at or below the ruin threshold is absorbed to exactly
/// zero and stays there for the rest of the path. Expects params
/// already validated by [`SimParams::validate`].
pub fn simulate_path<P: StakePolicy + ?Sized>(
    policy: &P,
    params: &SimParams,
    rng: &mut StdRng,
) -> BankrollPath {
    let payout = params.decimal_odds - 1.0;
    let mut bankroll = params.starting_bankroll;
    let mut peak = bankroll;
    let mut max_drawdown = 0.0_f64;
    let mut values = Vec::with_capacity(params.step_count + 1);
    values.push(bankroll);

    for _ in 0..params.step_count {
        if bankroll == 0.0 {
            values.push(0.0);
            continue;
        }

        let stake = policy.stake(bankroll, peak).clamp(0.0, bankroll);
        let won = rng.gen::<f64>() < params.win_probability;
        if won {
            bankroll += stake * payout;
        } else {
            bankroll -= stake;
        }

        // Absorbing ruin
        if bankroll <= params.ruin_threshold {
            bankroll = 0.0;
        }

        if bankroll > peak {
            peak = bankroll;
        }
        let drawdown = (peak - bankroll) / peak;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
        values.push(bankroll);
    }

    BankrollPath {
        values,
        peak,
        max_drawdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FixedFraction, FlatStake};
    use rand::SeedableRng;

    fn make_params(step_count: usize, win_probability: f64) -> SimParams {
        SimParams {
            step_count,
            path_count: 1,
            starting_bankroll: 1000.0,
            win_probability,
            decimal_odds: 2.0,
            seed: 7,
            ruin_threshold: 0.0,
            trajectory_percentiles: vec![],
        }
    }

    #[test]
    fn test_certain_loss_flat_stake_hits_zero() {
        let params = make_params(20, 0.0);
        let policy = FlatStake::new(100.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let path = simulate_path(&policy, &params, &mut rng);

        assert_eq!(path.values.len(), 21);
        assert_eq!(path.values[0], 1000.0);
        assert_eq!(path.values[1], 900.0);
        // Drained after ten 100-unit losses, absorbed at zero after.
        assert_eq!(path.values[10], 0.0);
        assert_eq!(path.values[20], 0.0);
        assert!(path.is_ruined());
        assert_eq!(path.max_drawdown, 1.0);
        assert_eq!(path.peak, 1000.0);
    }

    #[test]
    fn test_certain_win_never_decreases() {
        let params = make_params(50, 1.0);
        let policy = FixedFraction::new(0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let path = simulate_path(&policy, &params, &mut rng);

        for pair in path.values.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(path.max_drawdown, 0.0);
        assert!(!path.is_ruined());
    }

    #[test]
    fn test_stake_clamped_to_bankroll() {
        // Policy wants 5000 from a 1000 bankroll; the loss can only
        // take what is actually there.
        let params = make_params(1, 0.0);
        let policy = FlatStake::new(5000.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let path = simulate_path(&policy, &params, &mut rng);

        assert_eq!(path.values[1], 0.0);
        assert!(path.is_ruined());
    }

    #[test]
    fn test_ruin_threshold_absorbs_early() {
        let mut params = make_params(10, 0.0);
        params.ruin_threshold = 500.0;
        let policy = FlatStake::new(100.0).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let path = simulate_path(&policy, &params, &mut rng);

        // 1000 -> 900 -> ... -> 500 is at the threshold: absorbed.
        assert_eq!(path.values[4], 600.0);
        assert_eq!(path.values[5], 0.0);
        assert!(path.is_ruined());
    }

    #[test]
    fn test_zero_probability_proportional_stake_survives() {
        // Proportional staking loses a fixed share per step and never
        // reaches exactly zero in finitely many bets.
        let params = make_params(100, 0.0);
        let policy = FixedFraction::new(0.10).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let path = simulate_path(&policy, &params, &mut rng);

        assert!(path.terminal() > 0.0);
        assert!(!path.is_ruined());
        assert!(path.max_drawdown > 0.99);
    }
}
