//! CLI argument definitions using clap
//!
//! This module contains the clap structs for the top-level command line and
//! for lines typed into the interactive shell. The actual command
//! implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finsight_core::{BudgetPeriod, Category, SubscriptionTier};

/// Finsight - Personal finance dashboard with budgets and spending insights
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Personal finance dashboard: categorize, budget, and get advice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subscription tier: free or premium
    #[arg(long, default_value = "free", global = true)]
    pub tier: SubscriptionTier,

    /// Seed for sample data and advisor replies (overrides the config seed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Skip the simulated processing delays
    #[arg(long, global = true)]
    pub no_delay: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which category a transaction description falls into
    Categorize {
        /// Transaction description (multiple words allowed)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Show the dashboard for a fresh session
    Dashboard {
        /// Load one batch of sample data first
        #[arg(long)]
        sample: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one batch of generated sample transactions
    Sample {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration and where it came from
    Config,

    /// Start an interactive session (type 'help' for commands)
    Shell,
}

/// One line typed into the interactive shell
#[derive(Parser)]
#[command(name = "finsight", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Show the dashboard
    Dashboard,

    /// Show the current tier, switch to a tier, or toggle when none is given
    Tier {
        /// free or premium
        tier: Option<SubscriptionTier>,
    },

    /// Load one batch of sample transactions
    Sample,

    /// Upload a CSV or JSON statement (processed as sample data)
    Upload {
        /// Statement file name
        file: PathBuf,
    },

    /// Add a single transaction
    Add {
        /// Amount (positive)
        amount: f64,

        /// Description (multiple words allowed)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,

        /// Category (auto-detected from the description if not given)
        #[arg(short, long)]
        category: Option<Category>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List transactions
    Transactions {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Budget management
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Ask the financial advisor a question
    Chat {
        /// Your question (multiple words allowed)
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Show the advisor conversation
    History,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// List budgets with their current spend
    List,

    /// Create a budget
    Add {
        /// Category name (e.g., "food", "Bills & Utilities")
        category: String,

        /// Spending limit
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Period: weekly or monthly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
    },

    /// Edit a budget (fields not given keep their current values)
    Edit {
        /// Budget ID or unique ID prefix
        id: String,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New spending limit
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// New period: weekly or monthly
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID or unique ID prefix
        id: String,
    },

    /// Show the budgeting tip for a category
    Suggest {
        /// Category name
        category: Category,
    },
}
