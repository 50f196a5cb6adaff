//! Expense recording and history management.
//!
//! Every recorded expense is appended to the history and then paid from the
//! cash asset. Editing the history afterwards rewrites the file but leaves
//! asset balances untouched.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::domain::commands::expenses::{
    ManualExpenseCommand, RecordExpenseCommand, RecordExpenseResult, ReplaceHistoryCommand,
    ReplaceHistoryResult,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::{
    is_known_category, normalize_date, resolve_category, Expense, CASH_ASSET, DATE_FORMAT,
    MANUAL_ENTRY_LABEL,
};
use crate::backend::storage::{AssetStorage, Connection, ExpenseStorage};

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    asset_repository: C::AssetRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            asset_repository: connection.create_asset_repository(),
        }
    }

    /// All expenses, newest first. Rows without a usable date go last and
    /// rows sharing a date show the most recently entered first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.expense_repository.load_expenses().await?;
        expenses.reverse();
        expenses.sort_by(|a, b| compare_newest_first(a.parsed_date(), b.parsed_date()));
        info!("Listed {} expenses", expenses.len());
        Ok(expenses)
    }

    /// Expenses dated in the same calendar month as `today`.
    pub async fn this_month(&self, today: NaiveDate) -> Result<Vec<Expense>> {
        let expenses = self.expense_repository.load_expenses().await?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.is_in_month(today.year(), today.month()))
            .collect())
    }

    /// Append one expense and deduct its price from cash.
    pub async fn record_expense(&self, command: RecordExpenseCommand) -> Result<RecordExpenseResult> {
        info!(
            "Recording expense: store={}, price={}, category={}",
            command.store, command.price, command.category
        );

        if command.price < 0 {
            return Err(DomainError::NegativePrice(command.price).into());
        }

        let date = match command.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => {
                normalize_date(raw).ok_or_else(|| DomainError::InvalidDate(raw.to_string()))?
            }
            None => today().format(DATE_FORMAT).to_string(),
        };

        let expense = Expense {
            date,
            store: command.store.trim().to_string(),
            item: command.item.trim().to_string(),
            price: command.price,
            category: resolve_category(&command.category).to_string(),
        };

        self.expense_repository
            .append_expenses(std::slice::from_ref(&expense))
            .await?;
        let cash_balance = self
            .asset_repository
            .update_asset(CASH_ASSET, -expense.price)
            .await?;

        info!(
            "Recorded {} yen at {} on {}, cash is now {}",
            expense.price, expense.store, expense.date, cash_balance
        );

        Ok(RecordExpenseResult {
            success_message: "記録完了＆現金を更新しました".to_string(),
            expense,
            cash_balance,
        })
    }

    /// Record an expense typed in by hand. Blank store and the item are
    /// labelled as manual entries.
    pub async fn record_manual_expense(
        &self,
        command: ManualExpenseCommand,
    ) -> Result<RecordExpenseResult> {
        if command.price < 0 {
            return Err(DomainError::NegativePrice(command.price).into());
        }
        let category = command.category.trim();
        if !is_known_category(category) {
            return Err(DomainError::UnknownCategory(command.category.clone()).into());
        }

        let store = command
            .store
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(MANUAL_ENTRY_LABEL)
            .to_string();

        let mut result = self
            .record_expense(RecordExpenseCommand {
                date: command.date,
                store,
                item: MANUAL_ENTRY_LABEL.to_string(),
                price: command.price,
                category: category.to_string(),
            })
            .await?;
        result.success_message = "記録しました".to_string();
        Ok(result)
    }

    /// Overwrite the history with an edited table.
    pub async fn replace_history(&self, command: ReplaceHistoryCommand) -> Result<ReplaceHistoryResult> {
        let mut kept = Vec::with_capacity(command.expenses.len());
        let mut dropped = 0;

        for mut expense in command.expenses {
            if expense.is_blank() {
                dropped += 1;
                continue;
            }
            if expense.price < 0 {
                return Err(DomainError::NegativePrice(expense.price).into());
            }
            match normalize_date(&expense.date) {
                Some(date) => expense.date = date,
                None => warn!("Keeping expense with unparseable date '{}'", expense.date),
            }
            expense.store = expense.store.trim().to_string();
            expense.item = expense.item.trim().to_string();
            expense.category = expense.category.trim().to_string();
            kept.push(expense);
        }

        self.expense_repository.replace_expenses(&kept).await?;
        info!("Saved edited history: {} rows kept, {} blank rows dropped", kept.len(), dropped);

        Ok(ReplaceHistoryResult {
            saved_count: kept.len(),
            success_message: "保存しました".to_string(),
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn compare_newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Asset;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use crate::backend::storage::CsvConnection;

    async fn setup() -> (TestEnvironment, ExpenseService<CsvConnection>) {
        let env = TestEnvironment::new().await.unwrap();
        let service = ExpenseService::new(Arc::new(env.connection.clone()));
        (env, service)
    }

    fn row(date: &str, store: &str, price: i64) -> Expense {
        Expense {
            date: date.to_string(),
            store: store.to_string(),
            item: "品目".to_string(),
            price,
            category: "食費".to_string(),
        }
    }

    fn manual(price: i64, category: &str, store: Option<&str>) -> ManualExpenseCommand {
        ManualExpenseCommand {
            date: Some("2024-03-07".to_string()),
            price,
            category: category.to_string(),
            store: store.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_record_expense_deducts_cash() {
        let (env, service) = setup().await;

        let result = service
            .record_expense(RecordExpenseCommand {
                date: Some("2024-03-07".to_string()),
                store: "スーパー".to_string(),
                item: "野菜".to_string(),
                price: 1280,
                category: "食費".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.expense.date, "2024/03/07");
        assert_eq!(result.cash_balance, -1280);

        let assets = env.connection.create_asset_repository().load_assets().await.unwrap();
        assert_eq!(assets, vec![Asset::new(CASH_ASSET, -1280)]);
        assert_eq!(service.list_expenses().await.unwrap(), vec![result.expense]);
    }

    #[tokio::test]
    async fn test_record_expense_maps_unknown_category() {
        let (_env, service) = setup().await;

        let result = service
            .record_expense(RecordExpenseCommand {
                date: None,
                store: "店".to_string(),
                item: "何か".to_string(),
                price: 100,
                category: "groceries".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.expense.category, "その他");
        assert_eq!(result.expense.date, today().format(DATE_FORMAT).to_string());
    }

    #[tokio::test]
    async fn test_record_expense_rejects_negative_price() {
        let (env, service) = setup().await;

        let err = service
            .record_expense(RecordExpenseCommand {
                date: None,
                store: "店".to_string(),
                item: "返品".to_string(),
                price: -500,
                category: "食費".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::NegativePrice(-500)));
        assert!(service.list_expenses().await.unwrap().is_empty());
        let assets = env.connection.create_asset_repository().load_assets().await.unwrap();
        assert_eq!(assets, vec![Asset::new(CASH_ASSET, 0)]);
    }

    #[tokio::test]
    async fn test_manual_entry_defaults_store_and_item() {
        let (_env, service) = setup().await;

        let blank = service.record_manual_expense(manual(500, "外食", Some("  "))).await.unwrap();
        let named = service.record_manual_expense(manual(700, "外食", Some("カフェ"))).await.unwrap();

        assert_eq!(blank.expense.store, MANUAL_ENTRY_LABEL);
        assert_eq!(blank.expense.item, MANUAL_ENTRY_LABEL);
        assert_eq!(named.expense.store, "カフェ");
        assert_eq!(named.expense.item, MANUAL_ENTRY_LABEL);
        assert_eq!(named.cash_balance, -1200);
        assert_eq!(named.success_message, "記録しました");
    }

    #[tokio::test]
    async fn test_manual_entry_validation() {
        let (_env, service) = setup().await;

        let err = service.record_manual_expense(manual(-1, "外食", None)).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::NegativePrice(-1)));

        let err = service.record_manual_expense(manual(100, "ペット", None)).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::UnknownCategory(_))));

        let mut bad_date = manual(100, "外食", None);
        bad_date.date = Some("someday".to_string());
        let err = service.record_manual_expense(bad_date).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::InvalidDate(_))));

        assert!(service.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_price_manual_entry_is_allowed() {
        let (_env, service) = setup().await;

        let result = service.record_manual_expense(manual(0, "その他", None)).await.unwrap();
        assert_eq!(result.cash_balance, 0);
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first_with_undated_last() {
        let (env, service) = setup().await;
        env.connection
            .create_expense_repository()
            .append_expenses(&[
                row("2024/03/01", "a", 1),
                row("unknown", "b", 2),
                row("2024/03/05", "c", 3),
                row("2024/03/01", "d", 4),
            ])
            .await
            .unwrap();

        let stores: Vec<String> = service
            .list_expenses()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.store)
            .collect();

        assert_eq!(stores, vec!["c", "d", "a", "b"]);
    }

    #[tokio::test]
    async fn test_this_month_filters_by_year_and_month() {
        let (env, service) = setup().await;
        env.connection
            .create_expense_repository()
            .append_expenses(&[
                row("2024/03/01", "in", 1),
                row("2024/02/29", "before", 2),
                row("2023/03/15", "last year", 3),
                row("bad", "undated", 4),
                row("2024-03-31 00:00:00", "late", 5),
            ])
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let stores: Vec<String> = service
            .this_month(today)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.store)
            .collect();

        assert_eq!(stores, vec!["in", "late"]);
    }

    #[tokio::test]
    async fn test_replace_history_drops_blank_rows_and_keeps_cash() {
        let (env, service) = setup().await;
        service.record_manual_expense(manual(1000, "食費", None)).await.unwrap();

        let mut blank = row("", "", 0);
        blank.item = "stray".to_string();
        let result = service
            .replace_history(ReplaceHistoryCommand {
                expenses: vec![row("2024-03-02", " 店 ", 300), blank],
            })
            .await
            .unwrap();

        assert_eq!(result.saved_count, 1);
        let history = service.list_expenses().await.unwrap();
        assert_eq!(history, vec![row("2024/03/02", "店", 300)]);

        let assets = env.connection.create_asset_repository().load_assets().await.unwrap();
        assert_eq!(assets, vec![Asset::new(CASH_ASSET, -1000)]);
    }

    #[tokio::test]
    async fn test_replace_history_rejects_negative_price() {
        let (_env, service) = setup().await;
        service.record_manual_expense(manual(1000, "食費", None)).await.unwrap();

        let err = service
            .replace_history(ReplaceHistoryCommand {
                expenses: vec![row("2024/03/02", "店", -5)],
            })
            .await
            .unwrap_err();

        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::NegativePrice(-5)));
        assert_eq!(service.list_expenses().await.unwrap().len(), 1);
    }
}
