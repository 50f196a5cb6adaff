//! Receipt scanning and budgeting advice, both backed by a generative model.
//!
//! The service works without a model configured; every call then fails with
//! [`AiError::MissingApiKey`] so the rest of the app keeps running.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::backend::ai::prompts::{advice_prompt, category_breakdown, receipt_prompt};
use crate::backend::ai::{parse_receipt_response, AiError, GenerativeModel, Part, ReceiptData};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::{Dashboard, CATEGORIES};

/// Caption shown under generated advice
pub const ADVICE_DISCLAIMER: &str = "※Geminiによる自動生成アドバイスです";

#[derive(Clone)]
pub struct AdvisorService {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl AdvisorService {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { model }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    fn model(&self) -> Result<&Arc<dyn GenerativeModel>, AiError> {
        self.model.as_ref().ok_or(AiError::MissingApiKey)
    }

    /// Read one receipt image.
    pub async fn scan_receipt(&self, image: Vec<u8>, mime_type: &str) -> Result<ReceiptData> {
        if image.is_empty() {
            return Err(DomainError::EmptyReceipt.into());
        }
        let model = self.model()?;

        info!("Scanning receipt: {} bytes of {}", image.len(), mime_type);
        let reply = model
            .generate(vec![Part::text(receipt_prompt(&CATEGORIES)), Part::image(mime_type, image)])
            .await?;

        let receipt = parse_receipt_response(&reply)?;
        info!(
            "Receipt read: store={}, price={}, category={}",
            receipt.store, receipt.price, receipt.category
        );
        Ok(receipt)
    }

    /// Ask for advice on this month's finances.
    pub async fn advise(&self, dashboard: &Dashboard) -> Result<String> {
        let model = self.model()?;

        let breakdown = category_breakdown(&dashboard.category_totals);
        let prompt = advice_prompt(
            dashboard.total_assets,
            dashboard.month_spent,
            dashboard.monthly_budget,
            &breakdown,
        );

        info!("Requesting advice for {}", dashboard.month_label());
        let advice = model.generate(vec![Part::text(prompt)]).await?;
        Ok(advice.trim().to_string())
    }
}
