//! # Storage Traits
//!
//! Storage abstractions used by the domain services. Each trait covers one
//! of the three tables the tracker keeps.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::{Asset, Expense};

/// Expense history storage
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Load every expense in file order. A missing file yields an empty list.
    async fn load_expenses(&self) -> Result<Vec<Expense>>;

    /// Append expenses to the end of the history
    async fn append_expenses(&self, expenses: &[Expense]) -> Result<()>;

    /// Overwrite the whole history
    async fn replace_expenses(&self, expenses: &[Expense]) -> Result<()>;
}

/// Asset balance storage
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Load all assets, or the default cash-only table when nothing is stored
    async fn load_assets(&self) -> Result<Vec<Asset>>;

    /// Overwrite the asset table
    async fn save_assets(&self, assets: &[Asset]) -> Result<()>;

    /// Add `delta` to the named asset, creating it when missing.
    /// Returns the asset's new amount.
    async fn update_asset(&self, name: &str, delta: i64) -> Result<i64>;
}

/// Monthly budget storage
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    /// Load the stored budget, or `default` when none is stored
    async fn load_budget(&self, default: i64) -> Result<i64>;

    async fn save_budget(&self, amount: i64) -> Result<()>;
}

/// A storage connection that hands out repositories.
///
/// Services are generic over this trait so the domain layer never names a
/// concrete backend.
pub trait Connection: Send + Sync + Clone + 'static {
    type ExpenseRepository: ExpenseStorage + Clone + 'static;
    type AssetRepository: AssetStorage + Clone + 'static;
    type BudgetRepository: BudgetStorage + Clone + 'static;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_asset_repository(&self) -> Self::AssetRepository;
    fn create_budget_repository(&self) -> Self::BudgetRepository;
}
