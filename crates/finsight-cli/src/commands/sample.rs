//! Sample data command implementation

use anyhow::{Context, Result};
use finsight_core::{Config, NewTransaction, TransactionType};

use super::{format_amount, sample_generator, today, truncate};

pub fn cmd_sample(config: &Config, seed: Option<u64>, json: bool) -> Result<()> {
    let batch = sample_generator(config, seed).generate(today());

    if json {
        let out = serde_json::to_string_pretty(&batch).context("Failed to serialize sample data")?;
        println!("{}", out);
        return Ok(());
    }

    println!();
    println!("🎲 Sample Transactions ({})", batch.len());
    println!("   ─────────────────────────────────────────────────────────────");
    print_new_transactions(&batch);
    println!();
    Ok(())
}

fn print_new_transactions(batch: &[NewTransaction]) {
    for tx in batch {
        let sign = match tx.kind {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        println!(
            "   {}  {:30}  {:18}  {}{}",
            tx.date,
            truncate(&tx.description, 30),
            tx.category.as_str(),
            sign,
            format_amount(tx.amount)
        );
    }
}
