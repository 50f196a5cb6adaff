//! Dashboard aggregation.
//!
//! Sums this month's spending per category and all dated spending per
//! calendar month. Expenses with an unparseable date count toward neither.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::backend::domain::models::{
    sum_amounts, total_amount, CategoryTotal, Dashboard, Expense, MonthlyTotal,
};
use crate::backend::domain::{AssetService, BudgetService, ExpenseService};
use crate::backend::storage::Connection;

#[derive(Clone)]
pub struct SummaryService<C: Connection> {
    expense_service: ExpenseService<C>,
    asset_service: AssetService<C>,
    budget_service: BudgetService<C>,
}

impl<C: Connection> SummaryService<C> {
    pub fn new(
        expense_service: ExpenseService<C>,
        asset_service: AssetService<C>,
        budget_service: BudgetService<C>,
    ) -> Self {
        Self {
            expense_service,
            asset_service,
            budget_service,
        }
    }

    /// Build the dashboard for the month containing `today`.
    pub async fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        let assets = self.asset_service.list_assets().await?;
        let monthly_budget = self.budget_service.monthly_budget().await?;
        let this_month = self.expense_service.this_month(today).await?;

        let month_spent = sum_amounts(this_month.iter().map(|e| e.price));
        let category_totals = category_totals(&this_month);

        debug!(
            "Dashboard for {}/{}: {} expenses, spent {}",
            today.year(),
            today.month(),
            this_month.len(),
            month_spent
        );

        Ok(Dashboard {
            year: today.year(),
            month: today.month(),
            total_assets: total_amount(&assets),
            month_spent,
            monthly_budget,
            assets,
            category_totals,
            expense_count: this_month.len(),
        })
    }

    /// Spending per calendar month, oldest first.
    pub async fn monthly_totals(&self) -> Result<Vec<MonthlyTotal>> {
        let expenses = self.expense_service.list_expenses().await?;
        Ok(monthly_totals(&expenses))
    }
}

/// Sum prices by category, largest first with ties broken by name.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<&str, i64> = HashMap::new();
    for expense in expenses {
        let total = sums.entry(expense.category.as_str()).or_default();
        *total = total.saturating_add(expense.price);
    }

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}

pub fn monthly_totals(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut sums: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for expense in expenses {
        if let Some(date) = expense.parsed_date() {
            let total = sums.entry((date.year(), date.month())).or_default();
            *total = total.saturating_add(expense.price);
        }
    }

    sums.into_iter()
        .map(|((year, month), total)| MonthlyTotal { year, month, total })
        .collect()
}
