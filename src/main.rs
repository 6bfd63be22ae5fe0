//! BETRISK - risk-adjusted wager evaluation.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! prices and sizes the configured bet, and stress-tests the staking
//! plan with a Monte Carlo bankroll simulation.

use anyhow::Result;
use tracing::info;

use betrisk::config::AppConfig;
use betrisk::ev::{self, EdgeEstimate};
use betrisk::odds::OddsQuote;
use betrisk::policy::{DrawdownGuard, KellyStake};
use betrisk::report;
use betrisk::sim::{PathSimulator, SimParams};
use betrisk::sizing::SizingEngine;

const BANNER: &str = r#"
 ____  _____ _____ ____  ___ ____  _  __
| __ )| ____|_   _|  _ \|_ _/ ___|| |/ /
|  _ \|  _|   | | | |_) || |\___ \| ' /
| |_) | |___  | | |  _ < | | ___) | . \
|____/|_____| |_| |_| \_\___|____/|_|\_\

  Risk-adjusted Kelly staking and bankroll stress testing
  v0.1.0
"#;

fn main() -> Result<()> {
    // Load configuration from TOML (defaults if the file is absent)
    let cfg = AppConfig::load_or_default("betrisk.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        american_odds = cfg.scenario.american_odds,
        true_probability = cfg.scenario.true_probability,
        uncertainty = cfg.scenario.uncertainty,
        bankroll = cfg.scenario.bankroll,
        "BETRISK starting up"
    );

    // -- Odds and expected value ------------------------------------------

    let quote = OddsQuote::from_american(cfg.scenario.american_odds)?;
    let evaluation = ev::evaluate(cfg.scenario.true_probability, quote, cfg.scenario.stake)?;
    print!("{}", report::render_evaluation(&evaluation));

    // -- Risk-adjusted sizing ---------------------------------------------

    let engine = SizingEngine::new(cfg.limits.clone());
    let estimate = EdgeEstimate::new(cfg.scenario.true_probability, quote)?;
    let decision = engine.decide(&estimate, cfg.scenario.uncertainty)?;
    print!("{}", report::render_decision(&decision, cfg.scenario.bankroll));

    // -- Monte Carlo stress test ------------------------------------------

    let kelly = KellyStake::new(&engine, &estimate, cfg.scenario.uncertainty)?;
    let policy = DrawdownGuard::new(kelly, engine.limits().max_drawdown_tolerance)?;

    let params = SimParams {
        step_count: cfg.simulation.step_count,
        path_count: cfg.simulation.path_count,
        starting_bankroll: cfg.scenario.bankroll,
        win_probability: cfg.scenario.true_probability,
        decimal_odds: quote.decimal(),
        seed: cfg.simulation.seed,
        ruin_threshold: cfg.simulation.ruin_threshold,
        trajectory_percentiles: cfg.simulation.trajectory_percentiles.clone(),
    };
    let summary = PathSimulator::new(params).run(&policy)?;
    print!("{}", report::render_summary(&summary));

    // Machine-readable dump for downstream tooling
    if std::env::var("BETRISK_REPORT_JSON").is_ok() {
        println!("{}", report::summary_json(&summary)?);
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("betrisk=info"));

    let json_logging = std::env::var("BETRISK_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
