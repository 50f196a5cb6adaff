//! # CSV Budget Repository
//!
//! Stores the monthly budget in `budget.csv` under a single `月予算` column.
//! Only the first row is meaningful.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::connection::CsvConnection;
use crate::backend::domain::models::parse_amount;
use crate::backend::storage::traits::BudgetStorage;

const BUDGET_HEADER: [&str; 1] = ["月予算"];

#[derive(Debug, Deserialize)]
struct BudgetRow {
    #[serde(rename = "月予算", default)]
    monthly_budget: String,
}

/// CSV-based budget repository
#[derive(Clone)]
pub struct CsvBudgetRepository {
    connection: CsvConnection,
}

impl CsvBudgetRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl BudgetStorage for CsvBudgetRepository {
    async fn load_budget(&self, default: i64) -> Result<i64> {
        let path = self.connection.budget_file_path();
        let Some(bytes) = self.connection.read_without_bom(&path)? else {
            return Ok(default);
        };

        let mut reader = self.connection.csv_reader(&bytes);
        let first = reader.deserialize::<BudgetRow>().next().transpose()?;

        match first.and_then(|row| parse_amount(&row.monthly_budget)) {
            Some(amount) => Ok(amount),
            None => {
                warn!("Budget file {} has no usable value, using default", path.display());
                Ok(default)
            }
        }
    }

    async fn save_budget(&self, amount: i64) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let path = self.connection.budget_file_path();
        self.connection.write_atomically(&path, &BUDGET_HEADER, |w| {
            w.write_record([amount.to_string()])?;
            Ok(())
        })
    }
}
