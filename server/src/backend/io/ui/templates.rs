//! HTML templates for the browser UI.
//!
//! Pages are assembled with `format!`. Every value that came from a user or
//! the data files goes through [`escape_html`].

use chrono::NaiveDate;

use super::charts::palette_hex;
use crate::backend::domain::models::{Dashboard, Expense, DATE_FORMAT};
use crate::backend::domain::ADVICE_DISCLAIMER;
use shared::format_yen;

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn base_layout(title: &str, content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, "Hiragino Sans", "Noto Sans JP", sans-serif; max-width: 760px; margin: 0 auto; padding: 24px; color: #1d1d1f; background: #ffffff; }}
        h1 {{ font-size: 1.8em; }}
        h2 {{ font-size: 1.2em; margin-top: 2em; }}
        .metrics {{ display: flex; gap: 12px; }}
        .metric {{ flex: 1; background: #f8f9fa; border-radius: 16px; padding: 15px 20px; }}
        .metric .label {{ font-size: 0.85em; color: #6e6e73; }}
        .metric .value {{ font-size: 1.5em; font-weight: 600; }}
        .metric .delta {{ font-size: 0.85em; }}
        .delta.positive {{ color: #1a7f37; }}
        .delta.negative {{ color: #cf222e; }}
        .banner {{ border-radius: 12px; padding: 12px 16px; margin: 12px 0; }}
        .banner.notice {{ background: #e6f4ea; }}
        .banner.error {{ background: #fdecea; }}
        .banner.info {{ background: #e8f0fe; }}
        .caption {{ font-size: 0.8em; color: #6e6e73; }}
        .chart-row {{ display: flex; gap: 16px; align-items: flex-start; }}
        .swatch {{ display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 6px; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td, th {{ padding: 4px 6px; border-bottom: 1px solid #eee; text-align: left; }}
        input, select {{ font-size: 0.95em; }}
        button.primary {{ width: 100%; border-radius: 12px; height: 3.5em; background-color: #0071e3; color: white; border: none; font-weight: 600; }}
        details {{ margin: 12px 0; }}
        form.inline {{ display: inline; }}
    </style>
</head>
<body>
{content}
</body>
</html>
"##
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let banner = error
        .map(|e| format!(r#"<div class="banner error">😕 {}</div>"#, escape_html(e)))
        .unwrap_or_default();

    base_layout(
        "Finance OS - Login",
        &format!(
            r##"
<h1>🔒 認証が必要です</h1>
<form method="post" action="/login">
    <label for="password">パスワードを入力してください</label><br>
    <input type="password" id="password" name="password" autofocus required>
    <button type="submit">ログイン</button>
</form>
{banner}
"##
        ),
    )
}

/// Everything the dashboard page renders
pub struct DashboardView<'a> {
    pub dashboard: &'a Dashboard,
    pub history: &'a [Expense],
    pub categories: &'a [&'a str],
    pub today: NaiveDate,
    pub donut_svg: Option<String>,
    pub monthly_svg: Option<String>,
    pub monthly_labels: Vec<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub advice: Option<String>,
    pub ai_enabled: bool,
}

pub fn dashboard_page(view: &DashboardView<'_>) -> String {
    let mut content = String::new();

    content.push_str(r#"<form class="inline" method="post" action="/logout" style="float:right"><button type="submit">ログアウト</button></form>"#);
    content.push_str("<h1>✨ Finance Overview</h1>");

    if let Some(notice) = &view.notice {
        content.push_str(&format!(r#"<div class="banner notice">✅ {}</div>"#, escape_html(notice)));
    }
    if let Some(error) = &view.error {
        content.push_str(&format!(r#"<div class="banner error">{}</div>"#, escape_html(error)));
    }

    content.push_str(&metrics_section(view.dashboard));
    content.push_str(&breakdown_section(view.dashboard));
    content.push_str(&advice_section(view));
    content.push_str("<hr>");
    content.push_str(&chart_section(view));
    content.push_str(&entry_section(view));
    content.push_str(&management_section(view));

    base_layout("Finance OS", &content)
}

fn metrics_section(dashboard: &Dashboard) -> String {
    let remaining = dashboard.budget_remaining();
    let delta_class = if remaining >= 0 { "positive" } else { "negative" };

    format!(
        r##"
<div class="metrics">
    <div class="metric"><div class="label">総資産額</div><div class="value">{total}</div></div>
    <div class="metric"><div class="label">今月の支出</div><div class="value">{spent}</div><div class="delta {delta_class}">予算差: {remaining}</div></div>
    <div class="metric"><div class="label">自由に使えるお金</div><div class="value">{free}</div></div>
</div>
"##,
        total = format_yen(dashboard.total_assets),
        spent = format_yen(dashboard.month_spent),
        remaining = format_yen(remaining),
        free = format_yen(dashboard.free_money()),
    )
}

fn breakdown_section(dashboard: &Dashboard) -> String {
    let assets: String = dashboard
        .assets
        .iter()
        .map(|a| format!("<li>{}: <b>{}</b></li>", escape_html(&a.name), format_yen(a.amount)))
        .collect();
    let spending: String = dashboard
        .category_totals
        .iter()
        .map(|c| format!("<li>{}: <b>{}</b></li>", escape_html(&c.category), format_yen(c.total)))
        .collect();

    format!(
        r##"
<details><summary>🏦 資産の内訳</summary><ul>{assets}</ul></details>
<details><summary>💸 支出の内訳</summary><ul>{spending}</ul></details>
"##
    )
}

fn advice_section(view: &DashboardView<'_>) -> String {
    let mut section = String::from("<h2>🤖 AI家計診断</h2>");

    if view.ai_enabled {
        section.push_str(r#"<form method="post" action="/advice"><button type="submit">AIにアドバイスをもらう</button></form>"#);
    } else {
        section.push_str(r#"<p class="caption">GEMINI_API_KEY が未設定のため利用できません</p>"#);
    }

    if let Some(advice) = &view.advice {
        section.push_str(&format!(
            r#"<div class="banner info">{}</div><p class="caption">{}</p>"#,
            escape_html(advice),
            ADVICE_DISCLAIMER
        ));
    }
    section
}

fn chart_section(view: &DashboardView<'_>) -> String {
    let mut section = String::new();
    let dashboard = view.dashboard;

    match (&view.donut_svg, dashboard.has_spending()) {
        (Some(svg), true) => {
            let legend: String = dashboard
                .category_totals
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    format!(
                        r#"<tr><td><span class="swatch" style="background:{}"></span>{}</td><td>{}</td></tr>"#,
                        palette_hex(i),
                        escape_html(&c.category),
                        format_yen(c.total)
                    )
                })
                .collect();

            section.push_str(&format!(
                r##"
<h2>🥧 カテゴリ別の支出分析</h2>
<div class="chart-row">
    <div>{svg}</div>
    <table><tr><th>category</th><th>金額</th></tr>{legend}</table>
</div>
"##
            ));
        }
        _ => section.push_str(r#"<div class="banner info">今月の記録はまだありません。</div>"#),
    }

    if let Some(svg) = &view.monthly_svg {
        let labels: String = view
            .monthly_labels
            .iter()
            .map(|l| format!("<span>{}</span>", escape_html(l)))
            .collect::<Vec<_>>()
            .join(" ");
        section.push_str(&format!(
            r##"
<h2>📊 月別の支出</h2>
<div>{svg}</div>
<p class="caption">{labels}</p>
"##
        ));
    }

    section
}

fn category_options(categories: &[&str], selected: &str) -> String {
    categories
        .iter()
        .map(|c| {
            let attr = if *c == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, escape_html(c), attr)
        })
        .collect()
}

fn entry_section(view: &DashboardView<'_>) -> String {
    let scan_form = if view.ai_enabled {
        r##"
<h3>📸 AIスキャン</h3>
<form method="post" action="/expenses/scan" enctype="multipart/form-data">
    <label>レシートをアップロード <input type="file" name="receipt" accept=".jpg,.jpeg,.png,image/jpeg,image/png" required></label>
    <button type="submit" class="primary">AI分析を実行</button>
</form>
"##
    } else {
        ""
    };

    let default_category = view.categories.first().copied().unwrap_or_default();

    format!(
        r##"
<h2>➕ 支出を追加する</h2>
{scan_form}
<h3>✍️ 手入力</h3>
<form method="post" action="/expenses/manual">
    <label>日付 <input type="date" name="date" value="{today}"></label>
    <label>金額 <input type="number" name="price" min="0" step="1" value="0" required></label><br>
    <label>カテゴリー <select name="category">{options}</select></label><br>
    <label>支払先 <input type="text" name="store"></label>
    <button type="submit">記録する</button>
</form>
"##,
        today = view.today.format("%Y-%m-%d"),
        options = category_options(view.categories, default_category),
    )
}

fn management_section(view: &DashboardView<'_>) -> String {
    let mut rows = String::new();
    for (i, expense) in view.history.iter().enumerate() {
        rows.push_str(&history_row(i, Some(expense), view.categories));
    }
    rows.push_str(&history_row(view.history.len(), None, view.categories));

    let mut asset_rows = String::new();
    for (i, asset) in view.dashboard.assets.iter().enumerate() {
        asset_rows.push_str(&format!(
            r#"<tr><td><input type="text" name="name-{i}" value="{name}"></td><td><input type="number" name="amount-{i}" value="{amount}" step="1"></td><td><input type="checkbox" name="delete-{i}"></td></tr>"#,
            name = escape_html(&asset.name),
            amount = asset.amount,
        ));
    }
    let new_asset = view.dashboard.assets.len();
    asset_rows.push_str(&format!(
        r#"<tr><td><input type="text" name="name-{new_asset}" placeholder="新しい項目"></td><td><input type="number" name="amount-{new_asset}" step="1"></td><td></td></tr>"#
    ));

    format!(
        r##"
<details>
<summary>⚙️ 履歴の編集・資産予算設定</summary>
<h4>📋 履歴の編集</h4>
<form method="post" action="/history">
    <table>
        <tr><th>date</th><th>store</th><th>item</th><th>price</th><th>category</th><th>削除</th></tr>
        {rows}
    </table>
    <button type="submit">履歴を保存</button>
</form>
<h4>🏦 資産の設定</h4>
<form method="post" action="/settings/assets">
    <table>
        <tr><th>項目</th><th>金額</th><th>削除</th></tr>
        {asset_rows}
    </table>
    <button type="submit">資産を保存</button>
</form>
<h4>🎯 月予算の設定</h4>
<form method="post" action="/settings/budget">
    <input type="number" name="monthly_budget" min="0" step="1" value="{budget}">
    <button type="submit">予算を保存</button>
</form>
</details>
"##,
        budget = view.dashboard.monthly_budget,
    )
}

fn history_row(index: usize, expense: Option<&Expense>, categories: &[&str]) -> String {
    let (date, store, item, price, category) = match expense {
        Some(e) => (
            e.parsed_date()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| e.date.clone()),
            e.store.as_str(),
            e.item.as_str(),
            e.price.to_string(),
            e.category.as_str(),
        ),
        None => (String::new(), "", "", String::new(), ""),
    };

    let mut options = String::new();
    if expense.is_none() {
        options.push_str(r#"<option value=""></option>"#);
    } else if !categories.contains(&category) {
        options.push_str(&format!(
            r#"<option value="{0}" selected>{0}</option>"#,
            escape_html(category)
        ));
    }
    options.push_str(&category_options(categories, category));

    let delete = if expense.is_some() {
        format!(r#"<input type="checkbox" name="delete-{index}">"#)
    } else {
        String::new()
    };

    format!(
        r#"<tr><td><input type="text" name="date-{index}" value="{date}" size="10"></td><td><input type="text" name="store-{index}" value="{store}"></td><td><input type="text" name="item-{index}" value="{item}"></td><td><input type="text" name="price-{index}" value="{price}" size="7"></td><td><select name="category-{index}">{options}</select></td><td>{delete}</td></tr>"#,
        date = escape_html(&date),
        store = escape_html(store),
        item = escape_html(item),
    )
}
