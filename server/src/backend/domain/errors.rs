//! Validation failures raised by the domain services.
//!
//! Services return `anyhow::Result`; the REST layer downcasts to
//! [`DomainError`] to answer with a 400 instead of a 500.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Price cannot be negative: {0}")]
    NegativePrice(i64),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Monthly budget cannot be negative: {0}")]
    NegativeBudget(i64),

    #[error("Amount out of range for {0}")]
    AmountOverflow(String),

    #[error("Asset name cannot be empty")]
    EmptyAssetName,

    #[error("Duplicate asset name: {0}")]
    DuplicateAssetName(String),

    #[error("Could not read the uploaded form: {0}")]
    InvalidUpload(String),

    #[error("Receipt image is empty")]
    EmptyReceipt,

    #[error("Unsupported image type: {0} (use JPEG or PNG)")]
    UnsupportedImageType(String),
}
