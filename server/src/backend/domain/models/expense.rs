//! Domain model for an expense record.
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format every stored expense date is written in
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Store and item recorded for manual entries left blank
pub const MANUAL_ENTRY_LABEL: &str = "手入力";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Raw date as stored; may be unparseable after a hand edit
    pub date: String,
    pub store: String,
    pub item: String,
    pub price: i64,
    pub category: String,
}

impl Expense {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_expense_date(&self.date)
    }

    /// Whether this expense falls in the given calendar month.
    /// Rows with an unparseable date belong to no month.
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.parsed_date()
            .map(|d| d.year() == year && d.month() == month)
            .unwrap_or(false)
    }

    pub fn is_blank(&self) -> bool {
        self.date.trim().is_empty() && self.store.trim().is_empty()
    }
}

/// Parse the date formats that end up in the expense file: the canonical
/// `YYYY/MM/DD`, ISO dates, date-times written by spreadsheet tools, and RFC 3339.
pub fn parse_expense_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in [DATE_FORMAT, "%Y-%m-%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Rewrite a parseable date in the canonical format.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_expense_date(raw).map(|d| d.format(DATE_FORMAT).to_string())
}

/// Parse an amount of yen written loosely: `1280`, `1280.0`, `¥1,280`, `1,280円`.
/// Fractional yen are rounded.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '¥' | '￥' | ',' | '円' | ' ' | '\u{3000}'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    if let Ok(value) = cleaned.parse::<i64>() {
        return Some(value);
    }

    cleaned
        .parse::<f64>()
        .ok()
        .map(f64::round)
        .filter(|v| (i64::MIN as f64..i64::MAX as f64).contains(v))
        .map(|v| v as i64)
}

/// Total of yen amounts, clamped at the `i64` range instead of overflowing.
pub fn sum_amounts<I: IntoIterator<Item = i64>>(amounts: I) -> i64 {
    amounts.into_iter().fold(0i64, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: &str) -> Expense {
        Expense {
            date: date.to_string(),
            store: "スーパー".to_string(),
            item: "野菜".to_string(),
            price: 500,
            category: "食費".to_string(),
        }
    }

    #[test]
    fn test_parse_canonical_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_expense_date("2024/03/07"), Some(expected));
        assert_eq!(parse_expense_date("2024/3/7"), Some(expected));
        assert_eq!(parse_expense_date("2024-03-07"), Some(expected));
        assert_eq!(parse_expense_date("2024-03-07 00:00:00"), Some(expected));
        assert_eq!(parse_expense_date("2024-03-07T12:30:00+09:00"), Some(expected));
    }

    #[test]
    fn test_unparseable_dates_coerce_to_none() {
        assert_eq!(parse_expense_date(""), None);
        assert_eq!(parse_expense_date("yesterday"), None);
        assert_eq!(parse_expense_date("2024/13/40"), None);
    }

    #[test]
    fn test_is_in_month() {
        assert!(expense("2024/03/31").is_in_month(2024, 3));
        assert!(!expense("2024/04/01").is_in_month(2024, 3));
        assert!(!expense("2023/03/15").is_in_month(2024, 3));
        assert!(!expense("not a date").is_in_month(2024, 3));
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-1-5"), Some("2024/01/05".to_string()));
        assert_eq!(normalize_date("garbage"), None);
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("1280"), Some(1280));
        assert_eq!(parse_amount("1280.0"), Some(1280));
        assert_eq!(parse_amount("¥1,280"), Some(1280));
        assert_eq!(parse_amount("1,280円"), Some(1280));
        assert_eq!(parse_amount(" 99.6 "), Some(100));
        assert_eq!(parse_amount("-300"), Some(-300));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_parse_amount_out_of_range() {
        assert_eq!(parse_amount("1e300"), None);
        assert_eq!(parse_amount("-1e19"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("1e15"), Some(1_000_000_000_000_000));
    }

    #[test]
    fn test_sum_amounts_clamps() {
        assert_eq!(sum_amounts([1280, 500]), 1780);
        assert_eq!(sum_amounts([i64::MAX, 1]), i64::MAX);
        assert_eq!(sum_amounts([i64::MIN, -1]), i64::MIN);
        assert_eq!(sum_amounts(Vec::new()), 0);
    }
}
