//! Domain model for an asset balance.
use serde::{Deserialize, Serialize};

/// Asset that every recorded expense is paid from
pub const CASH_ASSET: &str = "現金";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub amount: i64,
}

impl Asset {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Asset table used before anything has been saved: cash at zero.
pub fn default_assets() -> Vec<Asset> {
    vec![Asset::new(CASH_ASSET, 0)]
}

pub fn total_amount(assets: &[Asset]) -> i64 {
    super::sum_amounts(assets.iter().map(|a| a.amount))
}
