//! # IO Module
//!
//! The interface layer between browsers or API clients and the domain
//! services.
//!
//! - **rest**: JSON API under `/api`
//! - **ui**: Server-rendered HTML pages and form handlers
//! - **session**: Session cookie handling and the login guard shared by both
//! - **upload**: Receipt upload handling shared by both
//! - **report**: Plain-text summary for the command line

pub mod report;
pub mod rest;
pub mod session;
pub mod ui;
pub mod upload;
