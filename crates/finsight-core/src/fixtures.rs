//! Seedable sample transaction generator
//!
//! Stands in for real file parsing: an "upload" is answered with this fixed
//! set of ten transactions, categorized and dated somewhere in the trailing
//! window before `today`.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::categorize::categorize;
use crate::models::{NewTransaction, TransactionType};

/// Default number of days sample dates are spread over
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// (description, amount, type) for every sample row
const SAMPLE_ROWS: &[(&str, f64, TransactionType)] = &[
    ("Salary Credit", 75000.0, TransactionType::Income),
    ("Grocery Shopping - BigBazar", 2500.0, TransactionType::Expense),
    ("Uber Ride", 180.0, TransactionType::Expense),
    ("Netflix Subscription", 199.0, TransactionType::Expense),
    ("Restaurant - Pizza Hut", 850.0, TransactionType::Expense),
    ("Electricity Bill", 1200.0, TransactionType::Expense),
    ("Amazon Purchase", 1500.0, TransactionType::Expense),
    ("Freelance Payment", 15000.0, TransactionType::Income),
    ("Movie Tickets", 400.0, TransactionType::Expense),
    ("Gas Station", 2000.0, TransactionType::Expense),
];

/// Number of rows one batch contains
pub const SAMPLE_BATCH_SIZE: usize = SAMPLE_ROWS.len();

pub struct SampleGenerator {
    rng: StdRng,
    window_days: u32,
}

impl SampleGenerator {
    /// Deterministic generator for tests and reproducible demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Spread dates over the last `days` days (minimum 1)
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days.max(1);
        self
    }

    /// Produce one batch of sample transactions dated on or before `today`
    pub fn generate(&mut self, today: NaiveDate) -> Vec<NewTransaction> {
        SAMPLE_ROWS
            .iter()
            .map(|&(description, amount, kind)| {
                let days_back = self.rng.gen_range(0..self.window_days);
                NewTransaction {
                    amount,
                    description: description.to_string(),
                    category: categorize(description),
                    date: today - Duration::days(i64::from(days_back)),
                    kind,
                }
            })
            .collect()
    }
}
