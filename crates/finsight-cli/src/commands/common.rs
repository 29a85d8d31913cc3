//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve configuration, honoring --no-delay
//! - `sample_generator` / `reply_picker` - Seeded or entropy-backed randomness
//! - `simulate_delay` - The artificial processing pause
//! - Formatting helpers for amounts and progress bars

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use finsight_core::{
    config::DelaySettings, Config, ConfigSource, RandomPicker, SampleGenerator, Session,
};

/// Load configuration; --no-delay zeroes every simulated delay
pub fn load_config(path: Option<&Path>, no_delay: bool) -> Result<(Config, ConfigSource)> {
    let (mut config, source) = Config::load(path).context("Failed to load configuration")?;
    if no_delay {
        config.delays = DelaySettings::none();
    }
    tracing::debug!("Configuration loaded from {}", source);
    Ok((config, source))
}

/// Seed precedence: --seed, then `[fixtures] seed`, then entropy
pub fn effective_seed(config: &Config, seed: Option<u64>) -> Option<u64> {
    seed.or(config.fixtures.seed)
}

pub fn sample_generator(config: &Config, seed: Option<u64>) -> SampleGenerator {
    let generator = match effective_seed(config, seed) {
        Some(seed) => SampleGenerator::seeded(seed),
        None => SampleGenerator::from_entropy(),
    };
    generator.with_window_days(config.fixtures.window_days)
}

pub fn reply_picker(config: &Config, seed: Option<u64>) -> RandomPicker {
    match effective_seed(config, seed) {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    }
}

/// Pause before "delivering" a result; zero means no pause
pub async fn simulate_delay(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// Fixed-width bar; `percent` is clamped to 0..=100
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Resolve a budget ID or unique ID prefix to the full ID
pub fn resolve_budget_id(session: &Session, id_or_prefix: &str) -> Result<String> {
    if id_or_prefix.is_empty() {
        bail!("Budget ID cannot be empty");
    }

    let matches: Vec<&str> = session
        .budgets()
        .iter()
        .map(|b| b.id.as_str())
        .filter(|id| id.starts_with(id_or_prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("Budget not found: {}", id_or_prefix),
        _ => bail!(
            "Ambiguous budget ID '{}' matches {} budgets",
            id_or_prefix,
            matches.len()
        ),
    }
}
