//! CLI command tests
//!
//! This module contains all tests for the CLI commands and the shell.

use std::io::Write;
use std::time::Duration;

use chrono::NaiveDate;
use finsight_core::config::DelaySettings;
use finsight_core::{
    BudgetPeriod, Category, Config, ConfigSource, QuotaPolicy, Sender, SubscriptionTier,
    TransactionType,
};

use crate::commands::{self, short_id, truncate, Flow, Shell};

fn test_config() -> Config {
    Config {
        delays: DelaySettings::none(),
        ..Config::default()
    }
}

/// Free ceiling of zero: every import hits the limit
fn full_store_config() -> Config {
    Config {
        quota: QuotaPolicy {
            free_transactions: 0,
            free_chat_messages: 5,
        },
        ..test_config()
    }
}

fn shell(tier: SubscriptionTier) -> Shell {
    Shell::new(test_config(), tier, Some(42))
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Grocery Shopping - BigBazar", 10), "Grocery...");
    // Multi-byte characters are never split
    assert_eq!(truncate("Café au lait, très bon", 8), "Café ...");
}

#[test]
fn test_short_id() {
    assert_eq!(short_id("0f8fad5b-d9cb-469f-a165-70867728950e"), "0f8fad5b");
    assert_eq!(short_id("abc"), "abc");
}

#[test]
fn test_progress_bar() {
    assert_eq!(commands::progress_bar(0.0, 10), "░░░░░░░░░░");
    assert_eq!(commands::progress_bar(50.0, 10), "█████░░░░░");
    assert_eq!(commands::progress_bar(250.0, 4), "████");
    assert_eq!(commands::progress_bar(-10.0, 4), "░░░░");
}

#[test]
fn test_format_amount() {
    assert_eq!(commands::format_amount(2500.0), "₹2500.00");
    assert_eq!(commands::format_amount(199.5), "₹199.50");
}

// ========== Config Tests ==========

#[test]
fn test_load_config_from_file_with_no_delay() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[quota]\nfree_transactions = 20\n\n[delays]\nupload_ms = 500").unwrap();

    let (config, source) = commands::load_config(Some(file.path()), false).unwrap();
    assert_eq!(config.quota.free_transactions, 20);
    assert_eq!(config.delays.upload.as_millis(), 500);
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));

    let (config, _) = commands::load_config(Some(file.path()), true).unwrap();
    assert_eq!(config.delays, DelaySettings::none());
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::load_config(Some(&dir.path().join("missing.toml")), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_config() {
    commands::cmd_config(&test_config(), &ConfigSource::Embedded);
}

#[test]
fn test_effective_seed_precedence() {
    let mut config = test_config();
    assert_eq!(commands::effective_seed(&config, None), None);

    config.fixtures.seed = Some(7);
    assert_eq!(commands::effective_seed(&config, None), Some(7));
    assert_eq!(commands::effective_seed(&config, Some(9)), Some(9));
}

#[test]
fn test_sample_generator_is_reproducible_with_seed() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let a = commands::sample_generator(&test_config(), Some(5)).generate(today);
    let b = commands::sample_generator(&test_config(), Some(5)).generate(today);
    assert_eq!(a, b);
}

// ========== One-shot Command Tests ==========

#[test]
fn test_cmd_categorize() {
    assert!(commands::cmd_categorize("Uber ride home").is_ok());
    assert!(commands::cmd_categorize("   ").is_err());
}

#[test]
fn test_cmd_sample() {
    assert!(commands::cmd_sample(&test_config(), Some(1), false).is_ok());
    assert!(commands::cmd_sample(&test_config(), Some(1), true).is_ok());
}

#[test]
fn test_cmd_dashboard() {
    let result = commands::cmd_dashboard(test_config(), SubscriptionTier::Free, Some(3), true, false);
    assert!(result.is_ok());

    let result = commands::cmd_dashboard(test_config(), SubscriptionTier::Premium, None, false, true);
    assert!(result.is_ok());
}

#[test]
fn test_dashboard_session_reports_limit_separately() {
    let (session, notice) =
        commands::dashboard_session(full_store_config(), SubscriptionTier::Free, Some(1), true);
    assert!(session.transactions().is_empty());
    assert!(notice.unwrap().contains("Free plan limit reached"));

    // The limit notice goes to stderr, so --json output stays parseable
    let result =
        commands::cmd_dashboard(full_store_config(), SubscriptionTier::Free, Some(1), true, true);
    assert!(result.is_ok());
}

#[test]
fn test_dashboard_session_with_sample_counts_categories() {
    let (session, notice) =
        commands::dashboard_session(test_config(), SubscriptionTier::Free, Some(8), true);
    assert!(notice.is_none());

    let dashboard = session.dashboard(commands::today());
    assert_eq!(
        dashboard.category_counts,
        vec![
            (Category::FoodDining, 1),
            (Category::Transportation, 2),
            (Category::Shopping, 2),
            (Category::Entertainment, 2),
            (Category::BillsUtilities, 1),
            (Category::Income, 1),
            (Category::Other, 1),
        ]
    );
    commands::print_category_counts(&dashboard.category_counts);

    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["category_counts"][0][0], "Food & Dining");
    assert_eq!(json["category_counts"][0][1], 1);
}

// ========== Shell Tests ==========

#[tokio::test]
async fn test_shell_blank_and_invalid_lines_continue() {
    let mut shell = shell(SubscriptionTier::Free);
    assert_eq!(shell.execute("").await.unwrap(), Flow::Continue);
    assert_eq!(shell.execute("   \n").await.unwrap(), Flow::Continue);
    assert_eq!(shell.execute("frobnicate").await.unwrap(), Flow::Continue);
    assert_eq!(shell.execute("help").await.unwrap(), Flow::Continue);
    assert_eq!(shell.execute("quit").await.unwrap(), Flow::Quit);
    assert_eq!(shell.execute("exit").await.unwrap(), Flow::Quit);
}

#[tokio::test]
async fn test_shell_sample_until_limit_then_upgrade() {
    let mut shell = shell(SubscriptionTier::Free);
    for _ in 0..10 {
        shell.execute("sample").await.unwrap();
    }
    assert_eq!(shell.session().transactions().len(), 100);

    shell.execute("upload march.csv").await.unwrap();
    assert_eq!(shell.session().transactions().len(), 100);

    // No tier given toggles
    shell.execute("tier").await.unwrap();
    assert_eq!(shell.session().tier(), SubscriptionTier::Premium);
    shell.execute("upload march.csv").await.unwrap();
    assert_eq!(shell.session().transactions().len(), 110);

    shell.execute("tier free").await.unwrap();
    assert_eq!(shell.session().tier(), SubscriptionTier::Free);
    shell.execute("dashboard").await.unwrap();
    shell.execute("transactions --limit 3").await.unwrap();
}

#[tokio::test]
async fn test_shell_full_store_skips_processing_delay() {
    let config = Config {
        delays: DelaySettings {
            upload: Duration::from_secs(60),
            sample: Duration::from_secs(60),
            chat_reply: Duration::ZERO,
        },
        ..full_store_config()
    };
    let mut shell = Shell::new(config, SubscriptionTier::Free, Some(42));

    let sample = tokio::time::timeout(Duration::from_secs(5), shell.execute("sample")).await;
    assert_eq!(sample.unwrap().unwrap(), Flow::Continue);

    let upload =
        tokio::time::timeout(Duration::from_secs(5), shell.execute("upload march.csv")).await;
    assert_eq!(upload.unwrap().unwrap(), Flow::Continue);
    assert!(shell.session().transactions().is_empty());
}

#[tokio::test]
async fn test_shell_sample_shows_category_counts() {
    let mut shell = shell(SubscriptionTier::Free);
    shell.execute("sample").await.unwrap();

    let counts = finsight_core::category_counts(shell.session().transactions());
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 10);
    assert_eq!(counts[0], (Category::FoodDining, 1));
    assert!(counts.contains(&(Category::Transportation, 2)));
}

#[tokio::test]
async fn test_shell_upload_rejects_other_formats() {
    let mut shell = shell(SubscriptionTier::Free);
    shell.execute("upload statement.pdf").await.unwrap();
    assert!(shell.session().transactions().is_empty());
}

#[tokio::test]
async fn test_shell_add_transaction() {
    let mut shell = shell(SubscriptionTier::Free);
    shell.execute("add 250 Uber to office").await.unwrap();
    shell
        .execute("add 5000 Salary bonus --income --date 2024-01-05")
        .await
        .unwrap();
    shell
        .execute("add 120 Pharmacy run --category health")
        .await
        .unwrap();

    let txs = shell.session().transactions();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].description, "Uber to office");
    assert_eq!(txs[0].category, Category::Transportation);
    assert_eq!(txs[0].kind, TransactionType::Expense);
    assert_eq!(txs[1].category, Category::Income);
    assert_eq!(txs[1].kind, TransactionType::Income);
    assert_eq!(txs[1].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert_eq!(txs[2].category, Category::Healthcare);

    assert!(shell.execute("add 0 Nothing").await.is_err());
    assert_eq!(shell.session().transactions().len(), 3);
}

#[tokio::test]
async fn test_shell_budget_lifecycle() {
    let mut shell = shell(SubscriptionTier::Free);
    shell.execute("budget add food 5000").await.unwrap();
    assert_eq!(shell.session().budgets().len(), 1);
    let id = shell.session().budgets()[0].id.clone();
    assert_eq!(shell.session().budgets()[0].period, BudgetPeriod::Monthly);

    shell
        .execute(&format!("budget edit {} --amount 3000 --period weekly", short_id(&id)))
        .await
        .unwrap();
    let budget = &shell.session().budgets()[0];
    assert_eq!(budget.id, id);
    assert_eq!(budget.category, Category::FoodDining);
    assert_eq!(budget.amount, 3000.0);
    assert_eq!(budget.period, BudgetPeriod::Weekly);

    shell.execute("budget").await.unwrap();
    shell.execute("budget suggest shopping").await.unwrap();

    shell
        .execute(&format!("budget delete {}", short_id(&id)))
        .await
        .unwrap();
    assert!(shell.session().budgets().is_empty());
}

#[tokio::test]
async fn test_shell_budget_errors() {
    let mut shell = shell(SubscriptionTier::Free);
    assert!(shell.execute("budget add income 100").await.is_err());
    assert!(shell.execute("budget add travel abc").await.is_err());
    assert!(shell.execute("budget add travel -50").await.is_err());
    assert!(shell.execute("budget delete deadbeef").await.is_err());
    assert!(shell.session().budgets().is_empty());
}

#[tokio::test]
async fn test_shell_chat_free_limit() {
    let mut shell = shell(SubscriptionTier::Free);
    for i in 0..6 {
        shell
            .execute(&format!("chat how do I save more {}", i))
            .await
            .unwrap();
    }

    let chat = shell.session().chat();
    assert_eq!(shell.session().questions_asked(), 5);
    // greeting + 5 * (question + answer) + limit notice
    assert_eq!(chat.len(), 12);
    assert_eq!(chat[1].sender, Sender::User);
    assert_eq!(chat[1].message, "how do I save more 0");
    assert!(chat[11].message.contains("free plan limit of 5 questions"));

    shell.execute("history").await.unwrap();
}

#[test]
fn test_resolve_budget_id() {
    use chrono::Utc;
    use finsight_core::{BudgetForm, Session};

    let mut session = Session::new(SubscriptionTier::Free, test_config(), Utc::now());
    let budget = session
        .create_budget(
            &BudgetForm::new("travel", "1000", BudgetPeriod::Monthly),
            Utc::now(),
        )
        .unwrap();

    assert_eq!(
        commands::resolve_budget_id(&session, short_id(&budget.id)).unwrap(),
        budget.id
    );
    assert_eq!(commands::resolve_budget_id(&session, &budget.id).unwrap(), budget.id);
    assert!(commands::resolve_budget_id(&session, "").is_err());
    assert!(commands::resolve_budget_id(&session, "zzz").is_err());
}
