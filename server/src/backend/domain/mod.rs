//! # Domain Module
//!
//! Contains the business logic of the household finance tracker.
//!
//! Services here operate on the domain models and reach storage only through
//! the [`Connection`](crate::backend::storage::Connection) trait, so they do
//! not know the data lives in CSV files.
//!
//! ## Module Organization
//!
//! - **expense_service**: Recording expenses, the history table and monthly filtering
//! - **asset_service**: Asset balances and their total
//! - **budget_service**: The single monthly budget
//! - **summary_service**: Dashboard figures and per-month totals
//! - **auth_service**: Shared-password login and sessions
//! - **advisor_service**: Receipt scanning and advice through the AI client
//!
//! ## Business Rules
//!
//! - Every recorded expense is paid from the `現金` (cash) asset
//! - Editing the history never touches asset balances
//! - Expenses with an unreadable date are kept but belong to no month
//! - Budget remaining and free money may go negative

pub mod advisor_service;
pub mod asset_service;
pub mod auth_service;
pub mod budget_service;
pub mod commands;
pub mod errors;
pub mod expense_service;
pub mod models;
pub mod summary_service;

pub use advisor_service::*;
pub use asset_service::*;
pub use auth_service::*;
pub use budget_service::*;
pub use errors::DomainError;
pub use expense_service::*;
pub use summary_service::*;
