//! Domain models for Finsight

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Spending/earning category label
///
/// The label set is fixed; `Category::all()` returns it in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Income => "Income",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }

    /// Get all categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::FoodDining,
            Self::Transportation,
            Self::Shopping,
            Self::Entertainment,
            Self::BillsUtilities,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::Income,
            Self::Investment,
            Self::Other,
        ]
    }

    /// Categories a budget can be created for (no Income/Investment)
    pub fn budgetable() -> &'static [Category] {
        &[
            Self::FoodDining,
            Self::Transportation,
            Self::Shopping,
            Self::Entertainment,
            Self::BillsUtilities,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::Other,
        ]
    }

    pub fn is_budgetable(&self) -> bool {
        Self::budgetable().contains(self)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Accepts the display label or a short alias, ignoring case and punctuation
    /// ("Food & Dining", "food-dining", "food", "bills", ...).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(|c| c.to_lowercase())
            .collect();

        match key.as_str() {
            "fooddining" | "food" | "dining" => Ok(Self::FoodDining),
            "transportation" | "transport" => Ok(Self::Transportation),
            "shopping" => Ok(Self::Shopping),
            "entertainment" => Ok(Self::Entertainment),
            "billsutilities" | "bills" | "utilities" => Ok(Self::BillsUtilities),
            "healthcare" | "health" => Ok(Self::Healthcare),
            "education" => Ok(Self::Education),
            "travel" => Ok(Self::Travel),
            "income" => Ok(Self::Income),
            "investment" | "investments" => Ok(Self::Investment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction held in the session store
///
/// Immutable once created; the store only appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Always non-negative; direction comes from `kind`
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// A transaction before the store assigns it an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl NewTransaction {
    /// Attach an id, producing a stored transaction
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            kind: self.kind,
        }
    }
}

/// Budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Trailing seven days
    Weekly,
    /// Calendar month to date
    #[default]
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(format!("Unknown budget period: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending limit for one category
///
/// Spend is not stored here; `budget::BudgetStatus` recomputes it from the
/// transaction store on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: Category,
    /// Spending limit for one period
    pub amount: f64,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
}

/// Spending trend direction for an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

/// Per-category expense summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsight {
    pub category: Category,
    /// Sum of expense amounts in this category
    pub amount: f64,
    /// Share of total expenses, 0-100
    pub percentage: f64,
    pub trend: Trend,
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One message in the advisor conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub message: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Subscription level gating feature ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            _ => Err(format!("Unknown subscription tier: {}", s)),
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str_aliases() {
        assert_eq!("Food & Dining".parse::<Category>(), Ok(Category::FoodDining));
        assert_eq!("food-dining".parse::<Category>(), Ok(Category::FoodDining));
        assert_eq!("BILLS".parse::<Category>(), Ok(Category::BillsUtilities));
        assert_eq!(
            "Bills & Utilities".parse::<Category>(),
            Ok(Category::BillsUtilities)
        );
        assert!("groceries".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_round_trips_labels() {
        for category in Category::all() {
            assert_eq!(category.as_str().parse::<Category>(), Ok(*category));
        }
    }

    #[test]
    fn test_budgetable_excludes_income_and_investment() {
        assert_eq!(Category::budgetable().len(), 9);
        assert!(!Category::budgetable().contains(&Category::Income));
        assert!(!Category::Investment.is_budgetable());
        assert!(Category::Other.is_budgetable());
    }

    #[test]
    fn test_transaction_serializes_with_type_field() {
        let tx = NewTransaction {
            amount: 180.0,
            description: "Uber Ride".to_string(),
            category: Category::Transportation,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            kind: TransactionType::Expense,
        }
        .into_transaction("t1".to_string());

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "Transportation");
        assert_eq!(json["date"], "2024-03-05");
    }

    #[test]
    fn test_tier_and_period_parse() {
        assert_eq!("Premium".parse::<SubscriptionTier>(), Ok(SubscriptionTier::Premium));
        assert!("gold".parse::<SubscriptionTier>().is_err());
        assert_eq!("week".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Weekly));
        assert_eq!(BudgetPeriod::default(), BudgetPeriod::Monthly);
        assert_eq!(SubscriptionTier::default(), SubscriptionTier::Free);
    }
}
