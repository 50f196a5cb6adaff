//! # Backend Module
//!
//! Contains all non-UI logic of the finance tracker and wires it together.
//!
//! ## Architecture
//!
//! ```text
//! Browser / API client
//!     ↓
//! IO Layer (HTML pages, REST API, session guard)
//!     ↓
//! Domain Layer (services, validation, aggregation)   →   AI Layer (Gemini)
//!     ↓
//! Storage Layer (CSV files)
//! ```

pub mod ai;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::backend::ai::{GeminiClient, GeminiConfig, GenerativeModel};
use crate::backend::domain::{
    AdvisorService, AssetService, AuthService, BudgetService, ExpenseService, SummaryService,
};
use crate::backend::storage::CsvConnection;
use crate::config::Config;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService<CsvConnection>,
    pub asset_service: AssetService<CsvConnection>,
    pub budget_service: BudgetService<CsvConnection>,
    pub summary_service: SummaryService<CsvConnection>,
    pub auth_service: AuthService,
    pub advisor_service: AdvisorService,
}

impl AppState {
    pub fn new(
        connection: CsvConnection,
        password: &str,
        default_budget: i64,
        model: Option<Arc<dyn GenerativeModel>>,
    ) -> Self {
        let connection = Arc::new(connection);
        let expense_service = ExpenseService::new(connection.clone());
        let asset_service = AssetService::new(connection.clone());
        let budget_service = BudgetService::new(connection, default_budget);
        let summary_service = SummaryService::new(
            expense_service.clone(),
            asset_service.clone(),
            budget_service.clone(),
        );

        Self {
            expense_service,
            asset_service,
            budget_service,
            summary_service,
            auth_service: AuthService::new(password),
            advisor_service: AdvisorService::new(model),
        }
    }
}

/// Build the Gemini client when an API key is configured
pub fn build_model(config: &Config) -> Result<Option<Arc<dyn GenerativeModel>>> {
    let Some(api_key) = config.gemini_api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        warn!("GEMINI_API_KEY is not set; receipt scanning and advice are disabled");
        return Ok(None);
    };

    let client = GeminiClient::new(GeminiConfig {
        model: config.gemini_model.clone(),
        base_url: config.gemini_base_url.clone(),
        ..GeminiConfig::new(api_key)
    })?;
    Ok(Some(Arc::new(client)))
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    let connection = CsvConnection::new(config.data_dir()?)?;
    info!("Using data directory {}", connection.base_directory().display());

    info!("Setting up domain services");
    let model = build_model(config)?;
    let app_state = AppState::new(
        connection,
        config.require_password()?,
        config.default_budget,
        model,
    );

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", io::rest::router(app_state.clone()))
        .merge(io::ui::router(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
pub mod test_support;
