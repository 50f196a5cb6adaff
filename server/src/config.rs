//! Command line and environment configuration.
//!
//! Every flag can also be set through the environment variable named next to
//! it; a `.env` file in the working directory is loaded first.

use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::backend::ai::{gemini::DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::backend::domain::models::DEFAULT_MONTHLY_BUDGET;

/// Directory created under the platform data directory
pub const APP_DIR_NAME: &str = "finance-os";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("APP_PASSWORD must be set to serve the app")]
    MissingPassword,

    #[error("No data directory available; set FINANCE_DATA_DIR")]
    NoDataDirectory,

    #[error("Default budget cannot be negative: {0}")]
    NegativeDefaultBudget(i64),
}

#[derive(Parser)]
#[command(name = "finance-os", version, about = "Household finance tracker")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the web app (default)
    Serve,
    /// Print this month's summary and exit
    Summary,
}

#[derive(Args, Clone)]
pub struct Config {
    /// Directory holding kakeibo.csv, assets.csv and budget.csv
    #[arg(long, env = "FINANCE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, env = "FINANCE_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// Shared login password
    #[arg(long, env = "APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Monthly budget used until one is saved
    #[arg(long, env = "FINANCE_DEFAULT_BUDGET", default_value_t = DEFAULT_MONTHLY_BUDGET)]
    pub default_budget: i64,
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(ConfigError::NoDataDirectory),
        }
    }

    pub fn require_password(&self) -> Result<&str, ConfigError> {
        self.app_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPassword)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_budget < 0 {
            return Err(ConfigError::NegativeDefaultBudget(self.default_budget));
        }
        Ok(())
    }
}

/// Secrets are left out
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("bind", &self.bind)
            .field("app_password", &self.app_password.as_ref().map(|_| "***"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("default_budget", &self.default_budget)
            .finish()
    }
}
