//! Spending insights - per-category expense breakdown and headline totals

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Category, SpendingInsight, Transaction, Trend};

/// Default number of categories shown in the spending chart
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Income/expense totals for the dashboard metric cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses
    pub net: f64,
}

pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let total_expenses = total_expenses(transactions);

    FinancialSummary {
        total_income,
        total_expenses,
        net: total_income - total_expenses,
    }
}

pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

/// Top expense categories by amount
///
/// Groups keep the order in which their category first appears, and the sort
/// is stable, so equal amounts stay in first-encountered order. The
/// percentage is the group's share of all expenses (0 when there are none).
pub fn top_categories(transactions: &[Transaction], limit: usize) -> Vec<SpendingInsight> {
    let mut groups: Vec<(Category, f64)> = Vec::new();
    let mut index: HashMap<Category, usize> = HashMap::new();

    for t in transactions.iter().filter(|t| t.is_expense()) {
        match index.get(&t.category) {
            Some(&i) => groups[i].1 += t.amount,
            None => {
                index.insert(t.category, groups.len());
                groups.push((t.category, t.amount));
            }
        }
    }

    let total: f64 = groups.iter().map(|(_, amount)| amount).sum();

    groups.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups.truncate(limit);

    groups
        .into_iter()
        .map(|(category, amount)| SpendingInsight {
            category,
            amount,
            percentage: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
            trend: Trend::Stable,
        })
        .collect()
}

/// The first `limit` transactions in store order
pub fn recent(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    &transactions[..limit.min(transactions.len())]
}
