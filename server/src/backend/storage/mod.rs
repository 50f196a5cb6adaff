//! # Storage Module
//!
//! Handles all data persistence for the finance tracker.
//!
//! Everything lives in three flat CSV files inside one data directory:
//!
//! ```text
//! data/
//! ├── kakeibo.csv   ← expense history (date,store,item,price,category)
//! ├── assets.csv    ← asset balances (項目,金額)
//! └── budget.csv    ← monthly budget (月予算)
//! ```
//!
//! Files are written UTF-8 with a byte-order mark so they open cleanly in
//! spreadsheet software. A missing file is never an error: readers fall back
//! to an empty table or a default.
//!
//! The domain layer only sees the traits in [`traits`]; the CSV
//! implementation can be swapped without touching business logic.

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::*;
