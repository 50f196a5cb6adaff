//! Form bodies posted by the dashboard.
//!
//! The history and asset editors post one field per cell, named
//! `<column>-<row>`, plus a `delete-<row>` checkbox. The last row of each
//! editor is blank and only counts when filled in.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::backend::domain::models::{parse_amount, Asset, Expense};
use crate::backend::domain::DomainError;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ManualExpenseForm {
    #[serde(default)]
    pub date: Option<String>,
    pub price: String,
    pub category: String,
    #[serde(default)]
    pub store: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    pub monthly_budget: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub notice: Option<String>,
}

/// Parse a whole-yen amount typed into a form
pub fn parse_form_amount(raw: &str) -> Result<i64, DomainError> {
    parse_amount(raw).ok_or_else(|| DomainError::InvalidAmount(raw.to_string()))
}

type Rows = BTreeMap<usize, HashMap<String, String>>;

/// Group `<column>-<row>` fields by row, dropping rows marked for deletion.
fn group_rows(fields: Vec<(String, String)>) -> Rows {
    let mut rows: Rows = BTreeMap::new();
    for (name, value) in fields {
        let Some((column, index)) = name.rsplit_once('-') else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        rows.entry(index).or_default().insert(column.to_string(), value);
    }
    rows.retain(|_, row| !row.contains_key("delete"));
    rows
}

fn cell(row: &HashMap<String, String>, column: &str) -> String {
    row.get(column).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Rows of the history editor in display order. Blank rows are passed on;
/// the expense service drops them.
pub fn parse_history_form(fields: Vec<(String, String)>) -> Result<Vec<Expense>, DomainError> {
    group_rows(fields)
        .into_values()
        .map(|row| {
            let price = cell(&row, "price");
            Ok(Expense {
                date: cell(&row, "date"),
                store: cell(&row, "store"),
                item: cell(&row, "item"),
                price: if price.is_empty() { 0 } else { parse_form_amount(&price)? },
                category: cell(&row, "category"),
            })
        })
        .collect()
}

/// Rows of the asset editor. Rows with neither a name nor an amount are skipped.
pub fn parse_asset_form(fields: Vec<(String, String)>) -> Result<Vec<Asset>, DomainError> {
    let mut assets = Vec::new();
    for row in group_rows(fields).into_values() {
        let name = cell(&row, "name");
        let amount = cell(&row, "amount");
        if name.is_empty() && amount.is_empty() {
            continue;
        }
        let amount = if amount.is_empty() { 0 } else { parse_form_amount(&amount)? };
        assets.push(Asset::new(name, amount));
    }
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_history_rows_in_index_order_without_deleted() {
        let rows = parse_history_form(fields(&[
            ("date-1", "2024/03/02"),
            ("store-1", "B"),
            ("price-1", "200"),
            ("category-1", "外食"),
            ("date-0", "2024/03/05"),
            ("store-0", "A"),
            ("item-0", "x"),
            ("price-0", "¥1,000"),
            ("category-0", "食費"),
            ("delete-2", "on"),
            ("date-2", "2024/03/01"),
            ("store-2", "C"),
            ("price-2", "5"),
            ("date-3", ""),
            ("store-3", ""),
            ("price-3", ""),
        ]))
        .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].store, "A");
        assert_eq!(rows[0].price, 1000);
        assert_eq!(rows[1].store, "B");
        assert_eq!(rows[1].item, "");
        assert!(rows[2].is_blank());
    }

    #[test]
    fn test_history_bad_price() {
        let err = parse_history_form(fields(&[("date-0", "2024/03/01"), ("price-0", "abc")])).unwrap_err();
        assert_eq!(err, DomainError::InvalidAmount("abc".to_string()));
    }

    #[test]
    fn test_asset_form() {
        let assets = parse_asset_form(fields(&[
            ("name-0", "現金"),
            ("amount-0", "12000"),
            ("name-1", "銀行"),
            ("amount-1", "300000"),
            ("delete-1", "on"),
            ("name-2", "証券"),
            ("amount-2", ""),
            ("name-3", ""),
            ("amount-3", ""),
        ]))
        .unwrap();

        assert_eq!(assets, vec![Asset::new("現金", 12000), Asset::new("証券", 0)]);
    }

    #[test]
    fn test_unrelated_fields_are_ignored() {
        let assets = parse_asset_form(fields(&[("submit", "1"), ("name-x", "y"), ("name-0", "現金")])).unwrap();
        assert_eq!(assets, vec![Asset::new("現金", 0)]);
    }
}
