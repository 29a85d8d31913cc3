//! Configuration for quotas, budget thresholds, display limits and delays
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path (`--config`), if given and present
//! 2. Override in data dir (~/.local/share/finsight/config.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Every section and key is optional; missing keys keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::budget::DEFAULT_NEAR_LIMIT_PERCENT;
use crate::error::{Error, Result};
use crate::fixtures::DEFAULT_WINDOW_DAYS;
use crate::insights::DEFAULT_TOP_LIMIT;
use crate::quota::QuotaPolicy;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/finsight.toml");

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Budget display thresholds, in percent of the limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSettings {
    pub near_limit_percent: f64,
    pub alert_percent: f64,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            near_limit_percent: DEFAULT_NEAR_LIMIT_PERCENT,
            alert_percent: DEFAULT_NEAR_LIMIT_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightSettings {
    pub top_limit: usize,
    pub recent_limit: usize,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            top_limit: DEFAULT_TOP_LIMIT,
            recent_limit: 5,
        }
    }
}

/// Simulated processing delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySettings {
    pub upload: Duration,
    pub sample: Duration,
    pub chat_reply: Duration,
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            upload: Duration::from_millis(2000),
            sample: Duration::from_millis(1000),
            chat_reply: Duration::from_millis(2000),
        }
    }
}

impl DelaySettings {
    pub fn none() -> Self {
        Self {
            upload: Duration::ZERO,
            sample: Duration::ZERO,
            chat_reply: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSettings {
    pub window_days: u32,
    pub seed: Option<u64>,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            seed: None,
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub quota: QuotaPolicy,
    pub budgets: BudgetSettings,
    pub insights: InsightSettings,
    pub delays: DelaySettings,
    pub fixtures: FixtureSettings,
}

impl Config {
    /// Load from the explicit path, the data-dir override, or embedded defaults
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                let config = Self::from_file(&default_path)?;
                return Ok((config, ConfigSource::File(default_path)));
            }
        }

        debug!("Using embedded default config");
        Ok((Self::parse(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse TOML content layered over the defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(quota) = raw.quota {
            if let Some(n) = quota.free_transactions {
                config.quota.free_transactions = n;
            }
            if let Some(n) = quota.free_chat_messages {
                config.quota.free_chat_messages = n;
            }
        }

        if let Some(budgets) = raw.budgets {
            if let Some(pct) = budgets.near_limit_percent {
                config.budgets.near_limit_percent = check_percent("near_limit_percent", pct)?;
            }
            if let Some(pct) = budgets.alert_percent {
                config.budgets.alert_percent = check_percent("alert_percent", pct)?;
            }
        }

        if let Some(insights) = raw.insights {
            if let Some(n) = insights.top_limit {
                config.insights.top_limit = n;
            }
            if let Some(n) = insights.recent_limit {
                config.insights.recent_limit = n;
            }
        }

        if let Some(delays) = raw.delays {
            if let Some(ms) = delays.upload_ms {
                config.delays.upload = Duration::from_millis(ms);
            }
            if let Some(ms) = delays.sample_ms {
                config.delays.sample = Duration::from_millis(ms);
            }
            if let Some(ms) = delays.chat_reply_ms {
                config.delays.chat_reply = Duration::from_millis(ms);
            }
        }

        if let Some(fixtures) = raw.fixtures {
            if let Some(days) = fixtures.window_days {
                config.fixtures.window_days = days;
            }
            config.fixtures.seed = fixtures.seed;
        }

        Ok(config)
    }
}

fn check_percent(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::Config(format!(
            "{} must be a non-negative number, got {}",
            key, value
        )))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finsight").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    quota: Option<RawQuota>,
    budgets: Option<RawBudgets>,
    insights: Option<RawInsights>,
    delays: Option<RawDelays>,
    fixtures: Option<RawFixtures>,
}

#[derive(Debug, Deserialize)]
struct RawQuota {
    free_transactions: Option<usize>,
    free_chat_messages: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawBudgets {
    near_limit_percent: Option<f64>,
    alert_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    top_limit: Option<usize>,
    recent_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawDelays {
    upload_ms: Option<u64>,
    sample_ms: Option<u64>,
    chat_reply_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawFixtures {
    window_days: Option<u32>,
    seed: Option<u64>,
}
