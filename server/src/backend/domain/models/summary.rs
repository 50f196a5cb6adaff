//! Aggregated views over the expense history.
use std::fmt;

use super::asset::Asset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: i64,
}

impl fmt::Display for MonthlyTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub year: i32,
    pub month: u32,
    pub total_assets: i64,
    pub month_spent: i64,
    pub monthly_budget: i64,
    pub assets: Vec<Asset>,
    /// Largest first, ties broken by name
    pub category_totals: Vec<CategoryTotal>,
    pub expense_count: usize,
}

impl Dashboard {
    /// Budget minus spending; negative when over budget
    pub fn budget_remaining(&self) -> i64 {
        self.monthly_budget.saturating_sub(self.month_spent)
    }

    /// Money left once this month's spending is taken from total assets
    pub fn free_money(&self) -> i64 {
        self.total_assets.saturating_sub(self.month_spent)
    }

    pub fn month_label(&self) -> String {
        format!("{:04}/{:02}", self.year, self.month)
    }

    pub fn has_spending(&self) -> bool {
        self.expense_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_metrics() {
        let dashboard = Dashboard {
            year: 2024,
            month: 3,
            total_assets: 50000,
            month_spent: 120000,
            monthly_budget: 100000,
            assets: vec![],
            category_totals: vec![],
            expense_count: 4,
        };

        assert_eq!(dashboard.budget_remaining(), -20000);
        assert_eq!(dashboard.free_money(), -70000);
        assert_eq!(dashboard.month_label(), "2024/03");
    }

    #[test]
    fn test_monthly_total_label() {
        let total = MonthlyTotal { year: 2023, month: 11, total: 5000 };
        assert_eq!(total.to_string(), "2023/11");
    }
}
