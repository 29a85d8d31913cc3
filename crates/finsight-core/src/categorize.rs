//! Keyword categorizer for transaction descriptions
//!
//! Rules are checked in order against the lower-cased description; the first
//! rule with any matching keyword wins. Anything unmatched is `Other`.

use crate::models::{Category, Transaction};

/// A keyword set mapped to a category
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

impl CategoryRule {
    /// Check a lower-cased description against this rule
    fn matches(&self, desc_lower: &str) -> bool {
        self.keywords.iter().any(|kw| desc_lower.contains(kw))
    }
}

/// Ordered rule list. Order matters: "Gas Station Food Mart" is Food & Dining.
pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["food", "restaurant", "dining"],
        category: Category::FoodDining,
    },
    CategoryRule {
        keywords: &["gas", "uber", "taxi", "bus"],
        category: Category::Transportation,
    },
    CategoryRule {
        keywords: &["amazon", "shopping", "store"],
        category: Category::Shopping,
    },
    CategoryRule {
        keywords: &["movie", "netflix", "spotify"],
        category: Category::Entertainment,
    },
    CategoryRule {
        keywords: &["electric", "water", "internet", "phone"],
        category: Category::BillsUtilities,
    },
    CategoryRule {
        keywords: &["salary", "income", "paycheck"],
        category: Category::Income,
    },
];

/// Map a free-text description to a category
pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.matches(&desc))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// Number of transactions per category, in `Category::all()` order
///
/// Categories with no transactions are omitted.
pub fn category_counts(transactions: &[Transaction]) -> Vec<(Category, usize)> {
    Category::all()
        .iter()
        .map(|&category| {
            let count = transactions
                .iter()
                .filter(|t| t.category == category)
                .count();
            (category, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
