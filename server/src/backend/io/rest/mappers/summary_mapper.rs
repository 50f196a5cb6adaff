use crate::backend::domain::models::{CategoryTotal, Dashboard, MonthlyTotal};
use shared::{
    CategoryTotal as SharedCategoryTotal, DashboardSummary, MonthlyTotal as SharedMonthlyTotal,
    MonthlyTotalsResponse,
};

use super::AssetMapper;

/// Mapper from the domain dashboard and totals to shared DTOs.
pub struct SummaryMapper;

impl SummaryMapper {
    pub fn to_dashboard_dto(domain: Dashboard) -> DashboardSummary {
        DashboardSummary {
            month: domain.month_label(),
            budget_remaining: domain.budget_remaining(),
            free_money: domain.free_money(),
            total_assets: domain.total_assets,
            month_spent: domain.month_spent,
            monthly_budget: domain.monthly_budget,
            expense_count: domain.expense_count,
            assets: domain.assets.into_iter().map(AssetMapper::to_dto).collect(),
            category_totals: domain
                .category_totals
                .into_iter()
                .map(Self::to_category_dto)
                .collect(),
        }
    }

    pub fn to_category_dto(domain: CategoryTotal) -> SharedCategoryTotal {
        SharedCategoryTotal {
            category: domain.category,
            total: domain.total,
        }
    }

    pub fn to_monthly_dto(totals: Vec<MonthlyTotal>) -> MonthlyTotalsResponse {
        MonthlyTotalsResponse {
            totals: totals
                .into_iter()
                .map(|t| SharedMonthlyTotal {
                    year: t.year,
                    month: t.month,
                    total: t.total,
                })
                .collect(),
        }
    }
}
