//! CSV file storage backend.

pub mod asset_repository;
pub mod budget_repository;
pub mod connection;
pub mod expense_repository;

#[cfg(test)]
pub mod test_utils;

pub use asset_repository::CsvAssetRepository;
pub use budget_repository::CsvBudgetRepository;
pub use connection::CsvConnection;
pub use expense_repository::CsvExpenseRepository;
