//! Prompt text sent to the model.

use crate::backend::domain::models::CategoryTotal;

/// Breakdown text used when nothing was spent this month
pub const NO_SPENDING_SUMMARY: &str = "今月の支出データなし";

/// Ask for one receipt as JSON, with the category picked from `categories`.
pub fn receipt_prompt(categories: &[&str]) -> String {
    format!(
        "画像を読み取り、JSON形式で出力してください。項目: date(YYYY/MM/DD), store, item, price(数値), category({}から選択)",
        categories.join("・")
    )
}

/// Ask for about 100 characters of upbeat, concrete saving advice.
pub fn advice_prompt(total_assets: i64, spent: i64, budget: i64, breakdown: &str) -> String {
    format!(
        "あなたは優秀な家計再生コンサルタントです。以下の家計データを見て、\n\
         ユーザーが節約したくなるような前向きで具体的なアドバイスを100文字程度で作成してください。\n\
         \n\
         ・総資産: {}円\n\
         ・今月の支出: {}円\n\
         ・月間予算: {}円\n\
         ・支出の内訳: {}\n",
        total_assets, spent, budget, breakdown
    )
}

/// Render category totals as `食費: 1280円, 外食: 500円`.
pub fn category_breakdown(totals: &[CategoryTotal]) -> String {
    if totals.is_empty() {
        return NO_SPENDING_SUMMARY.to_string();
    }
    totals
        .iter()
        .map(|t| format!("{}: {}円", t.category, t.total))
        .collect::<Vec<_>>()
        .join(", ")
}
