//! Turning the model's reply into a receipt.
//!
//! Models tend to wrap JSON in markdown fences and are loose about types, so
//! the reply is cleaned up before use: fences are stripped, a one-element
//! array is unwrapped, the price may be a number or a string, and categories
//! outside the known list become `その他`.

use serde_json::{Map, Value};
use tracing::warn;

use super::AiError;
use crate::backend::domain::models::{normalize_date, parse_amount, resolve_category};

/// A receipt as read by the model, ready to be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptData {
    /// `YYYY/MM/DD`, or `None` when the model gave no usable date
    pub date: Option<String>,
    pub store: String,
    pub item: String,
    pub price: i64,
    pub category: String,
}

/// Remove markdown code fences around a JSON reply
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_receipt_response(raw: &str) -> Result<ReceiptData, AiError> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| AiError::MalformedReceipt(format!("not JSON ({}): {}", e, cleaned)))?;

    let object = match value {
        Value::Object(map) => map,
        Value::Array(mut items) if items.len() == 1 => match items.remove(0) {
            Value::Object(map) => map,
            _ => return Err(AiError::MalformedReceipt("expected a JSON object".to_string())),
        },
        _ => return Err(AiError::MalformedReceipt("expected a JSON object".to_string())),
    };

    let price = match object.get("price") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.round() as i64)),
        Some(Value::String(s)) => parse_amount(s),
        _ => None,
    }
    .ok_or_else(|| AiError::MalformedReceipt("missing or invalid price".to_string()))?;

    let raw_date = text_field(&object, "date");
    let date = normalize_date(&raw_date);
    if date.is_none() && !raw_date.is_empty() {
        warn!("Ignoring unreadable receipt date '{}'", raw_date);
    }

    let raw_category = text_field(&object, "category");
    let category = resolve_category(&raw_category);
    if category != raw_category.trim() {
        warn!("Receipt category '{}' mapped to '{}'", raw_category, category);
    }

    Ok(ReceiptData {
        date,
        store: text_field(&object, "store"),
        item: text_field(&object, "item"),
        price,
        category: category.to_string(),
    })
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
