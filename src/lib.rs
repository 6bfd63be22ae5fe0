//! BETRISK - risk-adjusted wager evaluation.
//!
//! Prices a binary bet from odds and an estimated win probability,
//! sizes it with a risk-adjusted Kelly fraction, and stress-tests the
//! resulting staking plan with a Monte Carlo bankroll simulation.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod error;
pub mod ev;
pub mod odds;
pub mod policy;
pub mod report;
pub mod sim;
pub mod sizing;
