//! Domain models for household finance data.
//!
//! These types are internal to the backend. The REST layer maps them to the
//! DTOs in the `shared` crate.

pub mod asset;
pub mod category;
pub mod expense;
pub mod summary;

pub use asset::*;
pub use category::*;
pub use expense::*;
pub use summary::*;

/// Monthly budget used when nothing has been saved yet
pub const DEFAULT_MONTHLY_BUDGET: i64 = 100_000;
