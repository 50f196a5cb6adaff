//! Plain-text summary printed by the `summary` subcommand.

use std::fmt::Write;

use crate::backend::domain::models::Dashboard;
use shared::format_yen;

pub fn summary_report(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{} の家計", dashboard.month_label());
    let _ = writeln!(out, "  総資産額:         {}", format_yen(dashboard.total_assets));
    let _ = writeln!(out, "  今月の支出:       {}", format_yen(dashboard.month_spent));
    let _ = writeln!(out, "  月予算:           {}", format_yen(dashboard.monthly_budget));
    let _ = writeln!(out, "  予算差:           {}", format_yen(dashboard.budget_remaining()));
    let _ = writeln!(out, "  自由に使えるお金: {}", format_yen(dashboard.free_money()));

    if dashboard.category_totals.is_empty() {
        out.push_str("今月の記録はまだありません。\n");
    } else {
        out.push_str("支出の内訳:\n");
        for total in &dashboard.category_totals {
            let _ = writeln!(out, "  {}: {}", total.category, format_yen(total.total));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::CategoryTotal;

    fn dashboard(category_totals: Vec<CategoryTotal>) -> Dashboard {
        Dashboard {
            year: 2024,
            month: 3,
            total_assets: 250000,
            month_spent: category_totals.iter().map(|c| c.total).sum(),
            monthly_budget: 100000,
            assets: vec![],
            expense_count: category_totals.len(),
            category_totals,
        }
    }

    #[test]
    fn test_report_lists_metrics_and_breakdown() {
        let report = summary_report(&dashboard(vec![
            CategoryTotal { category: "外食".to_string(), total: 112000 },
            CategoryTotal { category: "食費".to_string(), total: 1280 },
        ]));

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "2024/03 の家計");
        assert!(lines[1].ends_with("¥250,000"));
        assert!(lines[2].ends_with("¥113,280"));
        assert!(lines[4].ends_with("¥-13,280"));
        assert!(lines[5].ends_with("¥136,720"));
        assert_eq!(lines[6], "支出の内訳:");
        assert_eq!(lines[7], "  外食: ¥112,000");
        assert_eq!(lines[8], "  食費: ¥1,280");
    }

    #[test]
    fn test_report_without_spending() {
        let report = summary_report(&dashboard(vec![]));

        assert!(report.contains("¥0"));
        assert!(report.ends_with("今月の記録はまだありません。\n"));
    }
}
