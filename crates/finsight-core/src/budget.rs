//! Budget aggregation and budget book management
//!
//! A budget's spend is never stored. `spent_for` sums matching expenses inside
//! the budget's period window every time it is asked, so a `BudgetStatus` is
//! always consistent with the transaction store it was computed from.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Budget, BudgetPeriod, Category, Transaction};

/// Percent of the limit above which a budget is near its limit
pub const DEFAULT_NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Inclusive date range a budget's spend is measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Compute the window for a period ending today
///
/// Weekly is the trailing seven days (`today - 7` through `today`), monthly
/// is the first of today's month through `today`.
pub fn period_window(period: BudgetPeriod, today: NaiveDate) -> PeriodWindow {
    let start = match period {
        BudgetPeriod::Weekly => today - Duration::days(7),
        BudgetPeriod::Monthly => today.with_day(1).unwrap_or(today),
    };
    PeriodWindow { start, end: today }
}

/// Sum of expenses in the budget's category within its current window
pub fn spent_for(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> f64 {
    let window = period_window(budget.period, today);

    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == budget.category && window.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Spend as a percentage of the limit
///
/// Returns `None` when the limit is zero, negative or not finite: the share is
/// undefined there and must not leak out as NaN or infinity.
pub fn usage_percent(spent: f64, limit: f64) -> Option<f64> {
    if !limit.is_finite() || limit <= 0.0 {
        return None;
    }
    Some(spent / limit * 100.0)
}

/// Traffic-light state of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::NearLimit => "near_limit",
            Self::OverBudget => "over_budget",
        }
    }

    /// Classify a spend against a limit
    ///
    /// Thresholds are strict: exactly 100% is near the limit, not over it.
    /// An undefined share (zero limit) is over budget as soon as anything is
    /// spent.
    pub fn classify(spent: f64, limit: f64, near_limit_percent: f64) -> Self {
        match usage_percent(spent, limit) {
            Some(pct) if pct > 100.0 => Self::OverBudget,
            Some(pct) if pct > near_limit_percent => Self::NearLimit,
            Some(_) => Self::OnTrack,
            None if spent > 0.0 => Self::OverBudget,
            None => Self::OnTrack,
        }
    }
}

impl std::fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget together with its freshly computed spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    /// `None` when the share is undefined (zero limit)
    pub usage: Option<f64>,
    pub health: BudgetHealth,
}

impl BudgetStatus {
    pub fn compute(
        budget: &Budget,
        transactions: &[Transaction],
        today: NaiveDate,
        near_limit_percent: f64,
    ) -> Self {
        let spent = spent_for(budget, transactions, today);
        Self {
            budget: budget.clone(),
            spent,
            usage: usage_percent(spent, budget.amount),
            health: BudgetHealth::classify(spent, budget.amount, near_limit_percent),
        }
    }

    /// Amount spent beyond the limit, if any
    pub fn over_by(&self) -> Option<f64> {
        let excess = self.spent - self.budget.amount;
        (excess > 0.0).then_some(excess)
    }

    /// Usage clamped to 0-100 for progress bars; undefined renders full
    pub fn progress_percent(&self) -> f64 {
        match self.usage {
            Some(pct) => pct.clamp(0.0, 100.0),
            None if self.spent > 0.0 => 100.0,
            None => 0.0,
        }
    }
}

/// Budgets whose usage is above the alert threshold
///
/// Undefined usage counts as alerting when anything was spent.
pub fn budget_alerts(statuses: &[BudgetStatus], alert_percent: f64) -> Vec<&BudgetStatus> {
    statuses
        .iter()
        .filter(|s| match s.usage {
            Some(pct) => pct > alert_percent,
            None => s.spent > 0.0,
        })
        .collect()
}

/// User-entered budget fields, as typed into the budget form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetForm {
    pub category: String,
    pub amount: String,
    pub period: BudgetPeriod,
}

impl BudgetForm {
    pub fn new(category: impl Into<String>, amount: impl Into<String>, period: BudgetPeriod) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
            period,
        }
    }

    /// Validate into (category, amount, period)
    pub fn validate(&self) -> Result<(Category, f64, BudgetPeriod)> {
        let category_text = self.category.trim();
        if category_text.is_empty() {
            return Err(Error::InvalidData("Budget category is required".to_string()));
        }
        let category: Category = category_text.parse().map_err(Error::InvalidData)?;
        if !category.is_budgetable() {
            let choices: Vec<&str> = Category::budgetable().iter().map(|c| c.as_str()).collect();
            return Err(Error::InvalidData(format!(
                "Budgets cannot be set for {}. Choose one of: {}",
                category,
                choices.join(", ")
            )));
        }

        let amount_text = self.amount.trim();
        if amount_text.is_empty() {
            return Err(Error::InvalidData("Budget amount is required".to_string()));
        }
        let amount: f64 = amount_text
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid budget amount: {}", amount_text)))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget amount must be positive: {}",
                amount_text
            )));
        }

        Ok((category, amount, self.period))
    }
}

/// Ordered collection of budgets with create/update/delete
#[derive(Debug, Clone, Default)]
pub struct BudgetBook {
    budgets: Vec<Budget>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Validate the form and append a new budget
    pub fn create(&mut self, form: &BudgetForm, now: DateTime<Utc>) -> Result<&Budget> {
        let (category, amount, period) = form.validate()?;
        let budget = Budget {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            amount,
            period,
            created_at: now,
        };
        info!(
            "Created {} budget for {}: {:.2}",
            budget.period, budget.category, budget.amount
        );
        self.budgets.push(budget);
        let last = self.budgets.len() - 1;
        Ok(&self.budgets[last])
    }

    /// Replace category/amount/period in place, keeping id and creation time
    pub fn update(&mut self, id: &str, form: &BudgetForm) -> Result<&Budget> {
        let (category, amount, period) = form.validate()?;
        let budget = self
            .budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::NotFound(format!("Budget {}", id)))?;

        debug!(
            "Updating budget {}: {} {:.2} {} -> {} {:.2} {}",
            id, budget.category, budget.amount, budget.period, category, amount, period
        );
        budget.category = category;
        budget.amount = amount;
        budget.period = period;
        Ok(&*budget)
    }

    pub fn delete(&mut self, id: &str) -> Result<Budget> {
        let pos = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| Error::NotFound(format!("Budget {}", id)))?;
        let removed = self.budgets.remove(pos);
        info!("Deleted budget for {}", removed.category);
        Ok(removed)
    }

    /// Recompute every budget's status against the given transactions
    pub fn statuses(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
        near_limit_percent: f64,
    ) -> Vec<BudgetStatus> {
        self.budgets
            .iter()
            .map(|b| BudgetStatus::compute(b, transactions, today, near_limit_percent))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, category: Category, amount: f64, date: NaiveDate) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: format!("test {}", id),
            category,
            date,
            kind: TransactionType::Expense,
        }
    }

    fn budget(category: Category, amount: f64, period: BudgetPeriod) -> Budget {
        Budget {
            id: "b1".to_string(),
            category,
            amount,
            period,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_period_window_monthly_starts_on_first() {
        let w = period_window(BudgetPeriod::Monthly, date(2024, 3, 17));
        assert_eq!(w.start, date(2024, 3, 1));
        assert_eq!(w.end, date(2024, 3, 17));

        let w = period_window(BudgetPeriod::Monthly, date(2024, 3, 1));
        assert_eq!(w.start, date(2024, 3, 1));
    }

    #[test]
    fn test_period_window_weekly_crosses_month() {
        let w = period_window(BudgetPeriod::Weekly, date(2024, 3, 3));
        assert_eq!(w.start, date(2024, 2, 25));
        assert_eq!(w.end, date(2024, 3, 3));
    }

    #[test]
    fn test_spent_for_weekly_boundaries() {
        let today = date(2024, 3, 20);
        let b = budget(Category::FoodDining, 1000.0, BudgetPeriod::Weekly);
        let txs = vec![
            expense("seven", Category::FoodDining, 100.0, today - Duration::days(7)),
            expense("eight", Category::FoodDining, 1000.0, today - Duration::days(8)),
            expense("today", Category::FoodDining, 5.0, today),
        ];

        assert_eq!(spent_for(&b, &txs, today), 105.0);
    }

    #[test]
    fn test_spent_for_monthly_excludes_prior_month_and_future() {
        let today = date(2024, 3, 20);
        let b = budget(Category::Shopping, 500.0, BudgetPeriod::Monthly);
        let txs = vec![
            expense("first", Category::Shopping, 40.0, date(2024, 3, 1)),
            expense("feb", Category::Shopping, 400.0, date(2024, 2, 29)),
            expense("future", Category::Shopping, 300.0, date(2024, 3, 21)),
            expense("mid", Category::Shopping, 60.0, date(2024, 3, 15)),
        ];

        assert_eq!(spent_for(&b, &txs, today), 100.0);
    }

    #[test]
    fn test_spent_for_filters_category_and_type() {
        let today = date(2024, 3, 20);
        let b = budget(Category::Transportation, 500.0, BudgetPeriod::Monthly);
        let mut income = expense("refund", Category::Transportation, 50.0, today);
        income.kind = TransactionType::Income;
        let txs = vec![
            income,
            expense("food", Category::FoodDining, 80.0, today),
            expense("uber", Category::Transportation, 180.0, today),
        ];

        assert_eq!(spent_for(&b, &txs, today), 180.0);
    }

    #[test]
    fn test_spent_for_is_not_clamped() {
        let today = date(2024, 3, 20);
        let b = budget(Category::Travel, 100.0, BudgetPeriod::Monthly);
        let txs = vec![expense("trip", Category::Travel, 450.0, today)];
        assert_eq!(spent_for(&b, &txs, today), 450.0);
    }

    #[test]
    fn test_usage_percent_zero_limit_is_undefined() {
        assert_eq!(usage_percent(50.0, 0.0), None);
        assert_eq!(usage_percent(0.0, 0.0), None);
        assert_eq!(usage_percent(50.0, f64::NAN), None);
        assert_eq!(usage_percent(50.0, 200.0), Some(25.0));
    }

    #[test]
    fn test_health_thresholds() {
        let near = DEFAULT_NEAR_LIMIT_PERCENT;
        assert_eq!(BudgetHealth::classify(80.0, 100.0, near), BudgetHealth::OnTrack);
        assert_eq!(BudgetHealth::classify(81.0, 100.0, near), BudgetHealth::NearLimit);
        assert_eq!(BudgetHealth::classify(100.0, 100.0, near), BudgetHealth::NearLimit);
        assert_eq!(BudgetHealth::classify(101.0, 100.0, near), BudgetHealth::OverBudget);
        assert_eq!(BudgetHealth::classify(1.0, 0.0, near), BudgetHealth::OverBudget);
        assert_eq!(BudgetHealth::classify(0.0, 0.0, near), BudgetHealth::OnTrack);
    }

    #[test]
    fn test_status_zero_amount_budget_has_sentinel() {
        let today = date(2024, 3, 20);
        let b = budget(Category::Other, 0.0, BudgetPeriod::Monthly);
        let txs = vec![expense("x", Category::Other, 25.0, today)];

        let status = BudgetStatus::compute(&b, &txs, today, DEFAULT_NEAR_LIMIT_PERCENT);
        assert_eq!(status.spent, 25.0);
        assert_eq!(status.usage, None);
        assert_eq!(status.health, BudgetHealth::OverBudget);
        assert_eq!(status.progress_percent(), 100.0);
        assert_eq!(status.over_by(), Some(25.0));
    }

    #[test]
    fn test_budget_alerts_over_threshold() {
        let today = date(2024, 3, 20);
        let mut book = BudgetBook::new();
        let now = Utc::now();
        book.create(&BudgetForm::new("food", "100", BudgetPeriod::Monthly), now)
            .unwrap();
        book.create(&BudgetForm::new("shopping", "100", BudgetPeriod::Monthly), now)
            .unwrap();
        let txs = vec![
            expense("a", Category::FoodDining, 85.0, today),
            expense("b", Category::Shopping, 80.0, today),
        ];

        let statuses = book.statuses(&txs, today, DEFAULT_NEAR_LIMIT_PERCENT);
        let alerts = budget_alerts(&statuses, 80.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].budget.category, Category::FoodDining);
    }

    #[test]
    fn test_form_validation() {
        assert!(BudgetForm::new("", "100", BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetForm::new("food", "", BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetForm::new("food", "abc", BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetForm::new("food", "0", BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetForm::new("food", "-5", BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetForm::new("food", "inf", BudgetPeriod::Monthly).validate().is_err());
        assert!(BudgetForm::new("income", "100", BudgetPeriod::Monthly).validate().is_err());

        let (category, amount, period) = BudgetForm::new(" Travel ", "2500.50", BudgetPeriod::Weekly)
            .validate()
            .unwrap();
        assert_eq!(category, Category::Travel);
        assert_eq!(amount, 2500.5);
        assert_eq!(period, BudgetPeriod::Weekly);
    }

    #[test]
    fn test_form_rejects_income_with_choices() {
        match BudgetForm::new("investments", "100", BudgetPeriod::Monthly).validate() {
            Err(Error::InvalidData(msg)) => {
                assert!(msg.starts_with("Budgets cannot be set for Investment"));
                assert!(msg.contains("Food & Dining"));
                assert!(msg.contains("Bills & Utilities"));
                assert!(!msg.contains("Income"));
            }
            other => panic!("expected invalid data, got {:?}", other),
        }
    }

    #[test]
    fn test_update_preserves_identity() {
        let mut book = BudgetBook::new();
        let created_at = Utc::now();
        let id = book
            .create(&BudgetForm::new("food", "100", BudgetPeriod::Monthly), created_at)
            .unwrap()
            .id
            .clone();

        let updated = book
            .update(&id, &BudgetForm::new("travel", "300", BudgetPeriod::Weekly))
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.category, Category::Travel);
        assert_eq!(updated.amount, 300.0);
        assert_eq!(updated.period, BudgetPeriod::Weekly);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_update_invalid_form_leaves_budget_untouched() {
        let mut book = BudgetBook::new();
        let id = book
            .create(&BudgetForm::new("food", "100", BudgetPeriod::Monthly), Utc::now())
            .unwrap()
            .id
            .clone();

        assert!(book.update(&id, &BudgetForm::new("food", "", BudgetPeriod::Weekly)).is_err());
        let budget = book.get(&id).unwrap();
        assert_eq!(budget.amount, 100.0);
        assert_eq!(budget.period, BudgetPeriod::Monthly);
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let mut book = BudgetBook::new();
        let form = BudgetForm::new("food", "100", BudgetPeriod::Monthly);
        assert!(matches!(book.update("missing", &form), Err(Error::NotFound(_))));
        assert!(matches!(book.delete("missing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_keeps_order() {
        let mut book = BudgetBook::new();
        let now = Utc::now();
        let ids: Vec<String> = ["food", "travel", "shopping"]
            .iter()
            .map(|c| {
                book.create(&BudgetForm::new(*c, "100", BudgetPeriod::Monthly), now)
                    .unwrap()
                    .id
                    .clone()
            })
            .collect();

        let removed = book.delete(&ids[1]).unwrap();
        assert_eq!(removed.category, Category::Travel);
        let remaining: Vec<Category> = book.budgets().iter().map(|b| b.category).collect();
        assert_eq!(remaining, vec![Category::FoodDining, Category::Shopping]);
    }
}
