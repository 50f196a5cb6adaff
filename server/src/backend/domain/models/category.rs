//! Expense categories offered by the entry forms and the receipt scanner.

pub const CATEGORIES: [&str; 19] = [
    "食費",
    "外食",
    "日用品",
    "交通費",
    "電気",
    "ガス",
    "水道",
    "インターネット",
    "スマホ",
    "家賃",
    "衣服",
    "美容",
    "医療費",
    "交際費",
    "趣味",
    "教育費",
    "車関連",
    "税金",
    "その他",
];

/// Category assigned when a scanned receipt names something unknown
pub const FALLBACK_CATEGORY: &str = "その他";

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// Map a free-text category onto the known list, falling back to "その他".
pub fn resolve_category(raw: &str) -> &'static str {
    let trimmed = raw.trim();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| *c == trimmed)
        .unwrap_or(FALLBACK_CATEGORY)
}

pub fn category_names() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}
