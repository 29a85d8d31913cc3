//! Finsight Core Library
//!
//! Shared functionality for the Finsight personal finance dashboard:
//! - Keyword categorizer for transaction descriptions
//! - Budget aggregation over weekly/monthly period windows
//! - Spending insights (top categories, income/expense totals)
//! - Tier quota policy for transactions and advisor questions
//! - Scripted advisor replies and budget suggestions
//! - Seedable sample data standing in for file uploads
//! - Session context tying the above together
//! - TOML configuration with embedded defaults

pub mod advisor;
pub mod budget;
pub mod categorize;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod insights;
pub mod models;
pub mod quota;
pub mod session;

pub use advisor::{FixedPicker, RandomPicker, ReplyPicker};
pub use budget::{
    period_window, spent_for, usage_percent, BudgetBook, BudgetForm, BudgetHealth, BudgetStatus,
    PeriodWindow,
};
pub use categorize::{categorize, category_counts};
pub use config::{Config, ConfigSource};
pub use error::{Error, Result};
pub use fixtures::SampleGenerator;
pub use insights::{summarize, top_categories, FinancialSummary};
pub use models::{
    Budget, BudgetPeriod, Category, ChatMessage, NewTransaction, Sender, SpendingInsight,
    SubscriptionTier, Transaction, TransactionType, Trend,
};
pub use quota::{allow_more, QuotaKind, QuotaPolicy};
pub use session::{ChatOutcome, Dashboard, ImportOutcome, Session, UploadOutcome};
