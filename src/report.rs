//! Plain-text and JSON rendering of evaluation results.

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::ev::BetEvaluation;
use crate::sim::stats::SimulationSummary;
use crate::sizing::StakeDecision;

const RULE: &str = "---------------------------------------------------------------";

/// Render the expected-value verdict for one bet.
pub fn render_evaluation(eval: &BetEvaluation) -> String {
    let verdict = if eval.expected_value > 0.0 {
        "GOOD BET"
    } else {
        "BAD BET"
    };

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "EXPECTED VALUE");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "true={:.1}% implied={:.1}% edge={:+.2}%",
        eval.true_probability * 100.0,
        eval.implied_probability * 100.0,
        eval.edge * 100.0,
    );
    let _ = writeln!(
        out,
        "stake=${:.2} ev=${:+.2} | {} | {}",
        eval.stake, eval.expected_value, eval.quality, verdict,
    );
    out
}

/// Render the sizing engine's verdict for one bet.
pub fn render_decision(decision: &StakeDecision, bankroll: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "RECOMMENDED STAKE");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "kelly={:.2}% stake={:.2}% of bankroll | {}",
        decision.kelly_fraction * 100.0,
        decision.stake_fraction * 100.0,
        decision.risk_regime,
    );
    let _ = writeln!(
        out,
        "on ${:.2} bankroll: bet ${:.2}",
        bankroll,
        decision.stake_amount(bankroll),
    );
    out
}

/// Render the Monte Carlo summary.
pub fn render_summary(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "MONTE CARLO | paths={} steps={} start=${:.2}",
        summary.path_count, summary.step_count, summary.starting_bankroll,
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "ruin={:.2}% profit={:.1}%",
        summary.ruin_probability * 100.0,
        summary.probability_of_profit * 100.0,
    );
    let _ = writeln!(
        out,
        "terminal: mean=${:.2} median=${:.2} p5=${:.2} p95=${:.2}",
        summary.terminal.mean,
        summary.terminal.percentile(50.0),
        summary.terminal.percentile(5.0),
        summary.terminal.percentile(95.0),
    );
    let _ = writeln!(
        out,
        "drawdown: mean={:.1}% p95={:.1}% worst={:.1}%",
        summary.max_drawdown.mean * 100.0,
        summary.max_drawdown.percentile(95.0) * 100.0,
        summary.max_drawdown.max * 100.0,
    );

    if !summary.trajectories.is_empty() {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "BANKROLL PERCENTILES OVER TIME");
        let steps = summary.step_count;
        let marks = [0, steps / 4, steps / 2, 3 * steps / 4, steps];
        for trajectory in &summary.trajectories {
            let mut line = format!("p{:>2.0}:", trajectory.percentile);
            for &mark in &marks {
                if let Some(value) = trajectory.values.get(mark) {
                    let _ = write!(line, " ${:>10.2}", value);
                }
            }
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

/// Serialize the summary for machine consumers.
pub fn summary_json(summary: &SimulationSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize simulation summary")
}
