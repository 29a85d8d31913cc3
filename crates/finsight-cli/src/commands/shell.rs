//! Interactive shell
//!
//! One session lives for the whole shell. Each input line is parsed with the
//! `ShellLine` clap definitions, so `help` and `<command> --help` work as they
//! do on the top-level command line.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use finsight_core::advisor::budget_suggestion;
use finsight_core::session::UPLOAD_EXTENSIONS;
use finsight_core::{
    categorize, category_counts, BudgetForm, ChatOutcome, Config, ImportOutcome, NewTransaction,
    RandomPicker, SampleGenerator, Sender, Session, SubscriptionTier, TransactionType,
    UploadOutcome,
};
use tracing::debug;

use super::{
    format_amount, print_budget_statuses, print_category_counts, print_dashboard,
    print_transactions, reply_picker, resolve_budget_id, sample_generator, simulate_delay, today,
};
use crate::cli::{BudgetAction, ShellCommand, ShellLine};

/// Whether the shell keeps reading after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    session: Session,
    generator: SampleGenerator,
    picker: RandomPicker,
}

impl Shell {
    pub fn new(config: Config, tier: SubscriptionTier, seed: Option<u64>) -> Self {
        let generator = sample_generator(&config, seed);
        let picker = reply_picker(&config, seed);
        Self {
            session: Session::new(tier, config, Utc::now()),
            generator,
            picker,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parse and run one input line
    ///
    /// Parse errors and `help` output are printed and leave the shell running.
    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        let args: Vec<&str> = line.split_whitespace().collect();
        if args.is_empty() {
            return Ok(Flow::Continue);
        }

        let parsed = match ShellLine::try_parse_from(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                e.print()?;
                return Ok(Flow::Continue);
            }
        };

        match parsed.command {
            ShellCommand::Dashboard => self.show_dashboard(),
            ShellCommand::Tier { tier } => self.switch_tier(tier),
            ShellCommand::Sample => self.load_sample().await,
            ShellCommand::Upload { file } => self.upload(&file).await,
            ShellCommand::Add {
                amount,
                description,
                income,
                category,
                date,
            } => {
                let description = description.join(" ");
                let kind = if income {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                };
                self.add_transaction(NewTransaction {
                    amount,
                    category: category.unwrap_or_else(|| categorize(&description)),
                    description,
                    date: date.unwrap_or_else(today),
                    kind,
                })?
            }
            ShellCommand::Transactions { limit } => self.list_transactions(limit),
            ShellCommand::Budget { action } => self.budget(action)?,
            ShellCommand::Chat { message } => self.chat(&message.join(" ")).await,
            ShellCommand::History => self.history(),
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn show_dashboard(&self) {
        let dashboard = self.session.dashboard(today());
        print_dashboard(&dashboard, self.session.transaction_usage().1);
    }

    fn switch_tier(&mut self, tier: Option<SubscriptionTier>) {
        let next = tier.unwrap_or(match self.session.tier() {
            SubscriptionTier::Free => SubscriptionTier::Premium,
            SubscriptionTier::Premium => SubscriptionTier::Free,
        });
        self.session.set_tier(next);

        match next {
            SubscriptionTier::Premium => {
                println!("✨ Premium plan: unlimited transactions and advisor questions")
            }
            SubscriptionTier::Free => {
                let quota = self.session.config().quota;
                println!(
                    "🆓 Free plan: {} transactions, {} advisor questions",
                    quota.free_transactions, quota.free_chat_messages
                );
            }
        }
    }

    async fn load_sample(&mut self) {
        if self.session.can_add_transactions() {
            println!("⏳ Loading sample data...");
            simulate_delay(self.session.config().delays.sample).await;
        }
        let outcome = self.session.load_sample_data(&mut self.generator, today());
        self.report_import(&outcome);
    }

    async fn upload(&mut self, file: &Path) {
        let supported = file
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| UPLOAD_EXTENSIONS.contains(&e.to_lowercase().as_str()));
        if supported && self.session.can_add_transactions() {
            println!("⏳ Processing {}...", file.display());
            simulate_delay(self.session.config().delays.upload).await;
        }

        match self
            .session
            .simulate_upload(file, &mut self.generator, today())
        {
            UploadOutcome::Processed { outcome } => self.report_import(&outcome),
            UploadOutcome::Rejected { message } => println!("❌ {}", message),
        }
    }

    fn add_transaction(&mut self, tx: NewTransaction) -> Result<()> {
        if !tx.amount.is_finite() || tx.amount <= 0.0 {
            bail!("Amount must be a positive number");
        }
        let category = tx.category;
        let outcome = self.session.import_batch(vec![tx]);
        if let ImportOutcome::Imported { inserted: 1, .. } = outcome {
            println!("✅ Added transaction ({})", category);
        }
        self.report_usage_if_limited(&outcome);
        Ok(())
    }

    fn report_import(&self, outcome: &ImportOutcome) {
        if let ImportOutcome::Imported { inserted, dropped } = outcome {
            println!("✅ Imported {} transactions", inserted);
            if *dropped > 0 {
                println!("   ⚠️  {} skipped", dropped);
            }
            if *inserted > 0 {
                println!("   🏷️  Categories");
                print_category_counts(&category_counts(self.session.transactions()));
            }
        }
        self.report_usage_if_limited(outcome);
    }

    fn report_usage_if_limited(&self, outcome: &ImportOutcome) {
        if let ImportOutcome::LimitReached { message } = outcome {
            println!("⚠️  {}", message);
        }
        if let (count, Some(max)) = self.session.transaction_usage() {
            println!("   Transactions: {}/{}", count, max);
        }
    }

    fn list_transactions(&self, limit: usize) {
        let transactions = self.session.transactions();
        if transactions.is_empty() {
            println!("No transactions. Try 'sample' or 'upload statement.csv'.");
            return;
        }
        println!();
        println!(
            "🧾 Transactions (showing {} of {})",
            limit.min(transactions.len()),
            transactions.len()
        );
        print_transactions(&transactions[..limit.min(transactions.len())]);
        println!();
    }

    fn budget(&mut self, action: Option<BudgetAction>) -> Result<()> {
        match action {
            None | Some(BudgetAction::List) => {
                let statuses = self.session.budget_statuses(today());
                if statuses.is_empty() {
                    println!("No budgets. Create one with: budget add food 5000");
                    return Ok(());
                }
                println!();
                println!("🎯 Budgets");
                print_budget_statuses(&statuses);
                println!();
            }
            Some(BudgetAction::Add {
                category,
                amount,
                period,
            }) => {
                let form = BudgetForm::new(category, amount, period);
                let budget = self.session.create_budget(&form, Utc::now())?;
                println!(
                    "✅ Created {} budget for {}: {}",
                    budget.period,
                    budget.category,
                    format_amount(budget.amount)
                );
                println!("   💡 {}", budget_suggestion(budget.category));
            }
            Some(BudgetAction::Edit {
                id,
                category,
                amount,
                period,
            }) => {
                let id = resolve_budget_id(&self.session, &id)?;
                let current = self
                    .session
                    .budgets()
                    .iter()
                    .find(|b| b.id == id)
                    .cloned();
                let Some(current) = current else {
                    bail!("Budget not found: {}", id);
                };

                let form = BudgetForm::new(
                    category.unwrap_or_else(|| current.category.as_str().to_string()),
                    amount.unwrap_or_else(|| current.amount.to_string()),
                    period.unwrap_or(current.period),
                );
                let budget = self.session.update_budget(&id, &form)?;
                println!(
                    "✅ Updated budget: {} {} {}",
                    budget.category,
                    budget.period,
                    format_amount(budget.amount)
                );
            }
            Some(BudgetAction::Delete { id }) => {
                let id = resolve_budget_id(&self.session, &id)?;
                let budget = self.session.delete_budget(&id)?;
                println!("🗑️  Deleted {} budget for {}", budget.period, budget.category);
            }
            Some(BudgetAction::Suggest { category }) => {
                println!("💡 {}: {}", category, budget_suggestion(category));
            }
        }
        Ok(())
    }

    async fn chat(&mut self, message: &str) {
        if self.session.chat_remaining() != Some(0) {
            simulate_delay(self.session.config().delays.chat_reply).await;
        }

        match self
            .session
            .send_chat(message, &mut self.picker, Utc::now())
        {
            ChatOutcome::Ignored => debug!("Ignoring blank advisor message"),
            ChatOutcome::LimitReached { notice } => println!("🔒 {}", notice.message),
            ChatOutcome::Replied { answer, .. } => {
                println!("🤖 {}", answer.message);
                if let Some(left) = self.session.chat_remaining() {
                    println!("   ({} questions left on the free plan)", left);
                }
            }
        }
    }

    fn history(&self) {
        for message in self.session.chat() {
            let who = match message.sender {
                Sender::User => "You",
                Sender::Ai => "Advisor",
            };
            println!(
                "[{}] {}: {}",
                message.timestamp.format("%H:%M"),
                who,
                message.message
            );
        }
    }
}

pub async fn cmd_shell(config: Config, tier: SubscriptionTier, seed: Option<u64>) -> Result<()> {
    let mut shell = Shell::new(config, tier, seed);

    println!("💰 Finsight shell ({} plan). Type 'help' for commands, 'quit' to leave.", tier);
    if let Some(greeting) = shell.session().chat().first() {
        println!("🤖 {}", greeting.message);
    }

    loop {
        print!("finsight> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            break;
        }

        match shell.execute(&input).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("❌ {}", e),
        }
    }

    println!("👋 Bye!");
    Ok(())
}
