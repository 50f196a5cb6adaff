//! # CSV Expense Repository
//!
//! Stores the expense history in `kakeibo.csv`:
//!
//! ```csv
//! date,store,item,price,category
//! 2024/03/07,スーパー,野菜,1280,食費
//! ```
//!
//! Reading is deliberately forgiving because the file is also edited by hand
//! and by spreadsheet tools: columns may be missing or reordered, prices may
//! carry currency symbols or decimals, and dates are kept verbatim.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::backend::domain::models::{parse_amount, Expense};
use crate::backend::storage::traits::ExpenseStorage;

const EXPENSE_HEADER: [&str; 5] = ["date", "store", "item", "price", "category"];

/// Raw row as read from disk; every column is optional text
#[derive(Debug, Deserialize)]
struct ExpenseRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    store: String,
    #[serde(default)]
    item: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    category: String,
}

impl ExpenseRow {
    fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.store.is_empty()
            && self.item.is_empty()
            && self.price.is_empty()
            && self.category.is_empty()
    }

    fn into_domain(self) -> Expense {
        let price = match parse_amount(&self.price) {
            Some(price) => price,
            None => {
                if !self.price.is_empty() {
                    warn!(
                        "Unparseable price '{}' for {} ({}), reading as 0",
                        self.price, self.store, self.date
                    );
                }
                0
            }
        };

        Expense {
            date: self.date,
            store: self.store,
            item: self.item,
            price,
            category: self.category,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExpenseRowOut<'a> {
    date: &'a str,
    store: &'a str,
    item: &'a str,
    price: i64,
    category: &'a str,
}

impl<'a> From<&'a Expense> for ExpenseRowOut<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            date: &expense.date,
            store: &expense.store,
            item: &expense.item,
            price: expense.price,
            category: &expense.category,
        }
    }
}

/// CSV-based expense repository
#[derive(Clone)]
pub struct CsvExpenseRepository {
    connection: CsvConnection,
}

impl CsvExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_expenses(&self) -> Result<Vec<Expense>> {
        let path = self.connection.expenses_file_path();
        let Some(bytes) = self.connection.read_without_bom(&path)? else {
            return Ok(Vec::new());
        };

        let mut reader = self.connection.csv_reader(&bytes);
        let mut expenses = Vec::new();

        for result in reader.deserialize::<ExpenseRow>() {
            let row = result?;
            if row.is_empty() {
                continue;
            }
            expenses.push(row.into_domain());
        }

        debug!("Loaded {} expenses from {}", expenses.len(), path.display());
        Ok(expenses)
    }

    fn write_rows(
        writer: &mut ::csv::Writer<std::io::BufWriter<std::fs::File>>,
        expenses: &[Expense],
    ) -> Result<()> {
        for expense in expenses {
            writer.serialize(ExpenseRowOut::from(expense))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseStorage for CsvExpenseRepository {
    async fn load_expenses(&self) -> Result<Vec<Expense>> {
        self.read_expenses()
    }

    async fn append_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let path = self.connection.expenses_file_path();
        self.connection
            .append(&path, &EXPENSE_HEADER, |w| Self::write_rows(w, expenses))
    }

    async fn replace_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let path = self.connection.expenses_file_path();
        self.connection
            .write_atomically(&path, &EXPENSE_HEADER, |w| Self::write_rows(w, expenses))
    }
}
