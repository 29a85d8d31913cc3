//! Session context
//!
//! Everything a user touches during one run of the dashboard lives here: the
//! subscription tier, the transaction store, the budget book and the advisor
//! conversation. Nothing is persisted. The aggregation modules never see the
//! session itself, only the slices it hands them.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::advisor::{self, ReplyPicker};
use crate::budget::{self, BudgetBook, BudgetForm, BudgetStatus};
use crate::categorize;
use crate::config::Config;
use crate::error::Result;
use crate::fixtures::SampleGenerator;
use crate::insights::{self, FinancialSummary};
use crate::models::{
    Budget, Category, ChatMessage, NewTransaction, Sender, SpendingInsight, SubscriptionTier,
    Transaction,
};
use crate::quota::QuotaKind;

/// File extensions the upload form accepts
pub const UPLOAD_EXTENSIONS: &[&str] = &["csv", "json"];

pub const TRANSACTION_LIMIT_MESSAGE: &str =
    "Free plan limit reached. Upgrade to Premium for unlimited transactions!";

/// Result of appending a batch of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// `inserted` rows were stored; `dropped` rows did not fit the quota
    Imported { inserted: usize, dropped: usize },
    /// Store already at the ceiling; nothing was stored
    LimitReached { message: String },
}

/// Result of a simulated file upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Processed { outcome: ImportOutcome },
    Rejected { message: String },
}

/// Result of sending a message to the advisor
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// Blank input, nothing appended
    Ignored,
    /// Free tier out of questions; the notice was appended as an AI message
    LimitReached { notice: ChatMessage },
    /// Question and scripted answer were both appended
    Replied {
        question: ChatMessage,
        answer: ChatMessage,
    },
}

/// Everything the dashboard page shows, computed for one date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub tier: SubscriptionTier,
    pub as_of: NaiveDate,
    pub summary: FinancialSummary,
    pub top_categories: Vec<SpendingInsight>,
    pub budget_alerts: Vec<BudgetStatus>,
    pub recent: Vec<Transaction>,
    /// Transactions per category, for the categorization panel
    pub category_counts: Vec<(Category, usize)>,
    pub transaction_count: usize,
}

pub struct Session {
    tier: SubscriptionTier,
    transactions: Vec<Transaction>,
    budgets: BudgetBook,
    chat: Vec<ChatMessage>,
    config: Config,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Session {
    /// Start a session; the advisor opens with a tier-specific greeting
    pub fn new(tier: SubscriptionTier, config: Config, now: DateTime<Utc>) -> Self {
        let greeting = ChatMessage {
            id: new_id(),
            message: advisor::greeting(tier),
            sender: Sender::Ai,
            timestamp: now,
        };
        Self {
            tier,
            transactions: Vec::new(),
            budgets: BudgetBook::new(),
            chat: vec![greeting],
            config,
        }
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: SubscriptionTier) {
        if tier != self.tier {
            info!("Subscription tier changed: {} -> {}", self.tier, tier);
        }
        self.tier = tier;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========== Transactions ==========

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Count and ceiling for the "37/100" badge (`None` ceiling = unlimited)
    pub fn transaction_usage(&self) -> (usize, Option<usize>) {
        (
            self.transactions.len(),
            self.config
                .quota
                .ceiling(self.tier, QuotaKind::Transactions),
        )
    }

    /// Append a batch, truncated to whatever the tier still allows
    ///
    /// Rows with a negative or non-finite amount are never stored; they are
    /// counted in `dropped` along with rows over the quota.
    pub fn import_batch(&mut self, batch: Vec<NewTransaction>) -> ImportOutcome {
        let current = self.transactions.len();
        let quota = self.config.quota;

        if !quota.allow_more(self.tier, current, QuotaKind::Transactions) {
            return self.limit_reached();
        }

        let requested = batch.len();
        let valid: Vec<NewTransaction> = batch
            .into_iter()
            .filter(|t| t.amount.is_finite() && t.amount >= 0.0)
            .collect();
        let invalid = requested - valid.len();
        if invalid > 0 {
            warn!(
                "Skipped {} transactions with a negative or non-finite amount",
                invalid
            );
        }

        let admitted = quota.admit(self.tier, current, valid.len(), QuotaKind::Transactions);
        self.transactions.extend(
            valid
                .into_iter()
                .take(admitted)
                .map(|t| t.into_transaction(new_id())),
        );

        let dropped = requested - admitted;
        if dropped > invalid {
            info!(
                "Imported {} of {} transactions ({} over the {} tier limit)",
                admitted,
                requested,
                dropped - invalid,
                self.tier
            );
        } else {
            debug!("Imported {} transactions", admitted);
        }

        ImportOutcome::Imported {
            inserted: admitted,
            dropped,
        }
    }

    /// Append one batch of generated sample data
    pub fn load_sample_data(
        &mut self,
        generator: &mut SampleGenerator,
        today: NaiveDate,
    ) -> ImportOutcome {
        if !self.can_add_transactions() {
            return self.limit_reached();
        }
        let batch = generator.generate(today);
        self.import_batch(batch)
    }

    /// Accept a CSV/JSON file name and answer it with sample data
    ///
    /// The file itself is never opened.
    pub fn simulate_upload(
        &mut self,
        file_name: &Path,
        generator: &mut SampleGenerator,
        today: NaiveDate,
    ) -> UploadOutcome {
        let extension = file_name
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension {
            Some(ext) if UPLOAD_EXTENSIONS.contains(&ext.as_str()) => {
                debug!("Simulating upload of {}", file_name.display());
                UploadOutcome::Processed {
                    outcome: self.load_sample_data(generator, today),
                }
            }
            _ => UploadOutcome::Rejected {
                message: format!(
                    "Unsupported file type: {}. Supports CSV, JSON formats",
                    file_name.display()
                ),
            },
        }
    }

    fn limit_reached(&self) -> ImportOutcome {
        warn!(
            "Transaction limit reached ({} stored, {} tier)",
            self.transactions.len(),
            self.tier
        );
        ImportOutcome::LimitReached {
            message: TRANSACTION_LIMIT_MESSAGE.to_string(),
        }
    }

    /// Whether the tier allows at least one more transaction
    pub fn can_add_transactions(&self) -> bool {
        self.config
            .quota
            .allow_more(self.tier, self.transactions.len(), QuotaKind::Transactions)
    }

    // ========== Budgets ==========

    pub fn budgets(&self) -> &[Budget] {
        self.budgets.budgets()
    }

    pub fn create_budget(&mut self, form: &BudgetForm, now: DateTime<Utc>) -> Result<Budget> {
        self.budgets.create(form, now).cloned()
    }

    pub fn update_budget(&mut self, id: &str, form: &BudgetForm) -> Result<Budget> {
        self.budgets.update(id, form).cloned()
    }

    pub fn delete_budget(&mut self, id: &str) -> Result<Budget> {
        self.budgets.delete(id)
    }

    /// Every budget with its spend recomputed for `today`
    pub fn budget_statuses(&self, today: NaiveDate) -> Vec<BudgetStatus> {
        self.budgets.statuses(
            &self.transactions,
            today,
            self.config.budgets.near_limit_percent,
        )
    }

    // ========== Advisor chat ==========

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    /// Messages the user has sent so far
    pub fn questions_asked(&self) -> usize {
        self.chat.iter().filter(|m| m.sender == Sender::User).count()
    }

    /// Questions left for this tier (`None` = unlimited)
    pub fn chat_remaining(&self) -> Option<usize> {
        self.config
            .quota
            .remaining(self.tier, self.questions_asked(), QuotaKind::ChatMessages)
    }

    pub fn send_chat(
        &mut self,
        text: &str,
        picker: &mut dyn ReplyPicker,
        now: DateTime<Utc>,
    ) -> ChatOutcome {
        if text.trim().is_empty() {
            return ChatOutcome::Ignored;
        }

        let asked = self.questions_asked();
        if !self
            .config
            .quota
            .allow_more(self.tier, asked, QuotaKind::ChatMessages)
        {
            let notice = ChatMessage {
                id: new_id(),
                message: advisor::limit_notice(self.config.quota.free_chat_messages),
                sender: Sender::Ai,
                timestamp: now,
            };
            self.chat.push(notice.clone());
            return ChatOutcome::LimitReached { notice };
        }

        let question = ChatMessage {
            id: new_id(),
            message: text.to_string(),
            sender: Sender::User,
            timestamp: now,
        };
        let answer = ChatMessage {
            id: new_id(),
            message: advisor::reply(text, picker),
            sender: Sender::Ai,
            timestamp: now,
        };
        self.chat.push(question.clone());
        self.chat.push(answer.clone());

        ChatOutcome::Replied { question, answer }
    }

    // ========== Dashboard ==========

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let statuses = self.budget_statuses(today);
        let alerts = budget::budget_alerts(&statuses, self.config.budgets.alert_percent)
            .into_iter()
            .cloned()
            .collect();

        Dashboard {
            tier: self.tier,
            as_of: today,
            summary: insights::summarize(&self.transactions),
            top_categories: insights::top_categories(
                &self.transactions,
                self.config.insights.top_limit,
            ),
            budget_alerts: alerts,
            recent: insights::recent(&self.transactions, self.config.insights.recent_limit)
                .to_vec(),
            category_counts: categorize::category_counts(&self.transactions),
            transaction_count: self.transactions.len(),
        }
    }
}
