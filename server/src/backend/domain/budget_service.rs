use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::errors::DomainError;
use crate::backend::storage::{BudgetStorage, Connection};

/// Reads and writes the single monthly budget
#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
    default_budget: i64,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>, default_budget: i64) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
            default_budget,
        }
    }

    pub async fn monthly_budget(&self) -> Result<i64> {
        self.budget_repository.load_budget(self.default_budget).await
    }

    pub async fn set_monthly_budget(&self, amount: i64) -> Result<i64> {
        if amount < 0 {
            return Err(DomainError::NegativeBudget(amount).into());
        }
        self.budget_repository.save_budget(amount).await?;
        info!("Monthly budget set to {}", amount);
        Ok(amount)
    }
}
