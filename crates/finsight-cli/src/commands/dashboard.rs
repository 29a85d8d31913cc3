//! Dashboard command implementation and the shared renderers

use anyhow::{Context, Result};
use chrono::Utc;
use finsight_core::{
    BudgetHealth, BudgetStatus, Category, Config, Dashboard, ImportOutcome, Session,
    SubscriptionTier, Transaction,
};

use super::{format_amount, progress_bar, sample_generator, short_id, today, truncate};

/// Fresh session for the one-shot dashboard, optionally loaded with sample data
///
/// Returns the limit message when sample data could not be loaded.
pub fn dashboard_session(
    config: Config,
    tier: SubscriptionTier,
    seed: Option<u64>,
    sample: bool,
) -> (Session, Option<String>) {
    let mut generator = sample_generator(&config, seed);
    let mut session = Session::new(tier, config, Utc::now());

    let mut notice = None;
    if sample {
        if let ImportOutcome::LimitReached { message } =
            session.load_sample_data(&mut generator, today())
        {
            notice = Some(message);
        }
    }
    (session, notice)
}

pub fn cmd_dashboard(
    config: Config,
    tier: SubscriptionTier,
    seed: Option<u64>,
    sample: bool,
    json: bool,
) -> Result<()> {
    let (session, notice) = dashboard_session(config, tier, seed, sample);
    let dashboard = session.dashboard(today());

    if json {
        // stdout carries only the JSON document
        if let Some(message) = notice {
            eprintln!("⚠️  {}", message);
        }
        let out =
            serde_json::to_string_pretty(&dashboard).context("Failed to serialize dashboard")?;
        println!("{}", out);
        return Ok(());
    }

    if let Some(message) = notice {
        println!("⚠️  {}", message);
    }
    print_dashboard(&dashboard, session.transaction_usage().1);
    Ok(())
}

pub fn print_dashboard(dashboard: &Dashboard, ceiling: Option<usize>) {
    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          💰 Finsight Dashboard          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Plan:            {}", dashboard.tier);
    match ceiling {
        Some(max) => println!("  Transactions:    {}/{}", dashboard.transaction_count, max),
        None => println!("  Transactions:    {}", dashboard.transaction_count),
    }
    println!();
    println!(
        "  📈 Total Income:    {}",
        format_amount(dashboard.summary.total_income)
    );
    println!(
        "  📉 Total Expenses:  {}",
        format_amount(dashboard.summary.total_expenses)
    );
    println!("  💼 Net Worth:       {}", format_amount(dashboard.summary.net));

    if dashboard.transaction_count == 0 {
        println!();
        println!("  No transactions yet. Load sample data or upload a statement.");
        println!();
        return;
    }

    if !dashboard.top_categories.is_empty() {
        println!();
        println!("  📊 Spending by Category");
        println!("     ─────────────────────────────────────────────");
        for insight in &dashboard.top_categories {
            println!(
                "     {:18} {:>12}  {:5.1}%",
                insight.category.as_str(),
                format_amount(insight.amount),
                insight.percentage
            );
        }
    }

    if !dashboard.category_counts.is_empty() {
        println!();
        println!("  🏷️  Transaction Categories");
        println!("     ─────────────────────────────────────────────");
        print_category_counts(&dashboard.category_counts);
    }

    if !dashboard.budget_alerts.is_empty() {
        println!();
        println!("  ⚠️  Budget Alerts");
        println!("     ─────────────────────────────────────────────");
        print_budget_statuses(&dashboard.budget_alerts);
    }

    if !dashboard.recent.is_empty() {
        println!();
        println!("  🧾 Recent Transactions");
        println!("     ─────────────────────────────────────────────");
        print_transactions(&dashboard.recent);
    }
    println!();
}

pub fn print_category_counts(counts: &[(Category, usize)]) {
    for (category, count) in counts {
        println!("     {:18} {:>4}", category.as_str(), count);
    }
}

/// Usage as a percentage, or a dash when the limit is zero
pub fn format_usage(status: &BudgetStatus) -> String {
    match status.usage {
        Some(pct) => format!("{:.0}%", pct),
        None => "—".to_string(),
    }
}

pub fn print_budget_statuses(statuses: &[BudgetStatus]) {
    for status in statuses {
        let icon = match status.health {
            BudgetHealth::OnTrack => "🟢",
            BudgetHealth::NearLimit => "🟡",
            BudgetHealth::OverBudget => "🔴",
        };
        println!(
            "     {} [{}] {} ({})",
            icon,
            short_id(&status.budget.id),
            status.budget.category,
            status.budget.period
        );
        println!(
            "        {} {}  {} of {}",
            progress_bar(status.progress_percent(), 20),
            format_usage(status),
            format_amount(status.spent),
            format_amount(status.budget.amount)
        );
        if let Some(excess) = status.over_by() {
            println!(
                "        You've exceeded your budget by {}.",
                format_amount(excess)
            );
        }
    }
}

pub fn print_transactions(transactions: &[Transaction]) {
    for tx in transactions {
        let sign = if tx.is_income() { '+' } else { '-' };
        println!(
            "     {}  {:30}  {:18}  {}{}",
            tx.date,
            truncate(&tx.description, 30),
            tx.category.as_str(),
            sign,
            format_amount(tx.amount)
        );
    }
}
