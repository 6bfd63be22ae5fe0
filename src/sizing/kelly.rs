//! Kelly criterion math.
//!
//! Pure functions behind the sizing engine: the raw Kelly fraction plus
//! the shrinkage factors that turn it into a deployable stake.

/// Raw Kelly fraction f* = edge / (decimal_odds - 1).
///
/// The bankroll fraction maximizing long-run log-growth for a repeated
/// binary bet at these odds. Monotone non-decreasing in edge; 0 when
/// edge <= 0 (never short a negative-EV bet). Caller guarantees
/// decimal_odds > 1.
pub fn kelly_fraction(edge: f64, decimal_odds: f64) -> f64 {
    debug_assert!(decimal_odds > 1.0);
    if edge <= 0.0 {
        return 0.0;
    }
    edge / (decimal_odds - 1.0)
}

/// Edge-aware shrinkage factor in [0, 1].
///
/// Small measured edges are the least reliable, so they are shrunk
/// disproportionately: 0 at or below `min_edge`, then a linear ramp in
/// edge that saturates at 1 once edge reaches `full_scale_edge`.
/// Monotone non-decreasing in edge.
pub fn edge_scale(edge: f64, min_edge: f64, full_scale_edge: f64) -> f64 {
    debug_assert!(full_scale_edge > min_edge);
    if edge <= min_edge {
        return 0.0;
    }
    (edge / full_scale_edge).min(1.0)
}

/// Uncertainty penalty factor in (0, 1].
///
/// 1 / (1 + weight * uncertainty): strictly decreasing in uncertainty
/// and exactly 1 at uncertainty 0, so noisier probability estimates
/// stake less even at identical nominal edge.
pub fn uncertainty_penalty(uncertainty: f64, weight: f64) -> f64 {
    debug_assert!(uncertainty >= 0.0 && weight >= 0.0);
    1.0 / (1.0 + weight * uncertainty)
}
