//! Receipt upload handling shared by the HTML form and the JSON API.

use anyhow::Result;
use axum::extract::multipart::{Multipart, MultipartError};
use tracing::{info, warn};

use crate::backend::domain::commands::expenses::{RecordExpenseCommand, RecordExpenseResult};
use crate::backend::domain::DomainError;
use crate::backend::AppState;

/// Multipart field carrying the image
pub const RECEIPT_FIELD: &str = "receipt";

/// Largest accepted upload
pub const MAX_RECEIPT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug)]
pub struct ReceiptUpload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

pub async fn read_receipt_upload(mut multipart: Multipart) -> Result<ReceiptUpload> {
    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        if field.name() != Some(RECEIPT_FIELD) {
            continue;
        }

        let mime_type = resolve_mime_type(field.content_type(), field.file_name())?;
        let data = field.bytes().await.map_err(invalid_upload)?.to_vec();
        if data.is_empty() {
            return Err(DomainError::EmptyReceipt.into());
        }
        return Ok(ReceiptUpload { data, mime_type });
    }

    Err(DomainError::EmptyReceipt.into())
}

fn invalid_upload(err: MultipartError) -> DomainError {
    warn!("Rejected receipt upload: {}", err.body_text());
    DomainError::InvalidUpload(err.body_text())
}

/// Work out the image type from the upload's content type, then its file
/// name. Uploads that say nothing useful are treated as JPEG.
pub fn resolve_mime_type(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, DomainError> {
    let content_type = content_type.map(|c| c.trim().to_ascii_lowercase());
    match content_type.as_deref() {
        Some("image/jpeg" | "image/jpg" | "image/pjpeg") => return Ok("image/jpeg".to_string()),
        Some("image/png") => return Ok("image/png".to_string()),
        _ => {}
    }

    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => return Ok("image/jpeg".to_string()),
        Some("png") => return Ok("image/png".to_string()),
        _ => {}
    }

    match content_type.as_deref() {
        None | Some("") | Some("application/octet-stream") => {
            warn!("Upload has no image type, assuming JPEG");
            Ok("image/jpeg".to_string())
        }
        Some(other) => Err(DomainError::UnsupportedImageType(other.to_string())),
    }
}

/// Read the receipt with the AI model, record it and pay it from cash.
pub async fn scan_and_record(state: &AppState, upload: ReceiptUpload) -> Result<RecordExpenseResult> {
    let receipt = state
        .advisor_service
        .scan_receipt(upload.data, &upload.mime_type)
        .await?;

    let mut result = state
        .expense_service
        .record_expense(RecordExpenseCommand {
            date: receipt.date,
            store: receipt.store,
            item: receipt.item,
            price: receipt.price,
            category: receipt.category,
        })
        .await?;

    info!("Scanned receipt recorded, cash balance {}", result.cash_balance);
    result.success_message = "記録完了＆現金を更新しました".to_string();
    Ok(result)
}
