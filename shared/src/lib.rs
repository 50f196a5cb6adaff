use serde::{Deserialize, Serialize};

/// A single recorded expense as exchanged with clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Purchase date, written as YYYY/MM/DD
    pub date: String,
    /// Where the money was spent
    pub store: String,
    /// What was bought
    pub item: String,
    /// Price in whole yen
    pub price: i64,
    /// One of the configured expense categories
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<ExpenseRecord>,
}

/// Manual entry form submitted by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualExpenseRequest {
    /// Optional date (YYYY/MM/DD or YYYY-MM-DD); today when absent
    pub date: Option<String>,
    pub price: i64,
    pub category: String,
    /// Payee; recorded as a manual entry when blank
    pub store: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordExpenseResponse {
    pub expense: ExpenseRecord,
    /// Cash balance after the expense was deducted
    pub cash_balance: i64,
    pub success_message: String,
}

/// Full replacement of the expense history (edited table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceExpensesRequest {
    pub expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceExpensesResponse {
    pub saved_count: usize,
    pub success_message: String,
}

/// A named asset and its balance in yen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetListResponse {
    pub assets: Vec<AssetBalance>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceAssetsRequest {
    pub assets: Vec<AssetBalance>,
}

/// Add (or subtract, when negative) an amount to a single asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustAssetRequest {
    pub name: String,
    pub delta: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustAssetResponse {
    pub name: String,
    pub new_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub monthly_budget: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBudgetRequest {
    pub monthly_budget: i64,
}

/// Spending total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Spending total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotalsResponse {
    pub totals: Vec<MonthlyTotal>,
}

/// Everything the dashboard shows for the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Month label, YYYY/MM
    pub month: String,
    pub total_assets: i64,
    pub month_spent: i64,
    pub monthly_budget: i64,
    /// Budget minus spending; negative when over budget
    pub budget_remaining: i64,
    /// Total assets minus this month's spending
    pub free_money: i64,
    pub assets: Vec<AssetBalance>,
    /// Sorted by total, largest first
    pub category_totals: Vec<CategoryTotal>,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub disclaimer: String,
}

/// Result of scanning a receipt and recording it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptScanResponse {
    pub expense: ExpenseRecord,
    pub cash_balance: i64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Format a yen amount with thousands separators, e.g. `¥-1,280`
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("¥-{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}
