//! # CSV Asset Repository
//!
//! Stores asset balances in `assets.csv` with the columns `項目` (name) and
//! `金額` (amount). When the file does not exist yet the table defaults to a
//! single cash row at zero.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::backend::domain::models::{default_assets, parse_amount, Asset};
use crate::backend::domain::DomainError;
use crate::backend::storage::traits::AssetStorage;

const ASSET_HEADER: [&str; 2] = ["項目", "金額"];

#[derive(Debug, Deserialize)]
struct AssetRow {
    #[serde(rename = "項目", default)]
    name: String,
    #[serde(rename = "金額", default)]
    amount: String,
}

#[derive(Debug, Serialize)]
struct AssetRowOut<'a> {
    #[serde(rename = "項目")]
    name: &'a str,
    #[serde(rename = "金額")]
    amount: i64,
}

/// CSV-based asset repository
#[derive(Clone)]
pub struct CsvAssetRepository {
    connection: CsvConnection,
}

impl CsvAssetRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_assets(&self) -> Result<Vec<Asset>> {
        let path = self.connection.assets_file_path();
        let Some(bytes) = self.connection.read_without_bom(&path)? else {
            debug!("No asset file yet, using defaults");
            return Ok(default_assets());
        };

        let mut reader = self.connection.csv_reader(&bytes);
        let mut assets = Vec::new();

        for result in reader.deserialize::<AssetRow>() {
            let row = result?;
            if row.name.is_empty() && row.amount.is_empty() {
                continue;
            }
            let amount = parse_amount(&row.amount).unwrap_or_else(|| {
                warn!("Unparseable amount '{}' for asset '{}', reading as 0", row.amount, row.name);
                0
            });
            assets.push(Asset::new(row.name, amount));
        }

        Ok(assets)
    }

    fn write_assets(&self, assets: &[Asset]) -> Result<()> {
        let path = self.connection.assets_file_path();
        self.connection.write_atomically(&path, &ASSET_HEADER, |w| {
            for asset in assets {
                w.serialize(AssetRowOut {
                    name: &asset.name,
                    amount: asset.amount,
                })?;
            }
            Ok(())
        })
    }
}

#[async_trait]
impl AssetStorage for CsvAssetRepository {
    async fn load_assets(&self) -> Result<Vec<Asset>> {
        self.read_assets()
    }

    async fn save_assets(&self, assets: &[Asset]) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        self.write_assets(assets)
    }

    async fn update_asset(&self, name: &str, delta: i64) -> Result<i64> {
        let _guard = self.connection.lock_for_write().await;
        let mut assets = self.read_assets()?;

        let new_amount = match assets.iter_mut().find(|a| a.name == name) {
            Some(asset) => {
                asset.amount = asset
                    .amount
                    .checked_add(delta)
                    .ok_or_else(|| DomainError::AmountOverflow(name.to_string()))?;
                asset.amount
            }
            None => {
                info!("Asset '{}' not found, creating it", name);
                assets.push(Asset::new(name, delta));
                delta
            }
        };

        self.write_assets(&assets)?;
        debug!("Asset '{}' adjusted by {} to {}", name, delta, new_amount);
        Ok(new_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::CASH_ASSET;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use std::fs;

    #[tokio::test]
    async fn test_missing_file_defaults_to_cash() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());

        let assets = repo.load_assets().await.unwrap();
        assert_eq!(assets, vec![Asset::new(CASH_ASSET, 0)]);
        assert!(!env.connection.assets_file_path().exists());
    }

    #[tokio::test]
    async fn test_update_existing_asset() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());

        let after_income = repo.update_asset(CASH_ASSET, 5000).await.unwrap();
        let after_spend = repo.update_asset(CASH_ASSET, -1280).await.unwrap();

        assert_eq!(after_income, 5000);
        assert_eq!(after_spend, 3720);
        assert_eq!(repo.load_assets().await.unwrap(), vec![Asset::new(CASH_ASSET, 3720)]);
    }

    #[tokio::test]
    async fn test_update_missing_asset_creates_row() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());

        let amount = repo.update_asset("銀行", 200000).await.unwrap();

        assert_eq!(amount, 200000);
        assert_eq!(
            repo.load_assets().await.unwrap(),
            vec![Asset::new(CASH_ASSET, 0), Asset::new("銀行", 200000)]
        );
    }

    #[tokio::test]
    async fn test_update_past_range_leaves_balance_untouched() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());

        repo.update_asset("銀行", i64::MAX).await.unwrap();
        let err = repo.update_asset("銀行", 1).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::AmountOverflow("銀行".to_string()))
        );
        assert_eq!(
            repo.load_assets().await.unwrap(),
            vec![Asset::new(CASH_ASSET, 0), Asset::new("銀行", i64::MAX)]
        );
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());
        let assets = vec![Asset::new(CASH_ASSET, 12000), Asset::new("銀行", 350000)];

        repo.save_assets(&assets).await.unwrap();

        assert_eq!(repo.load_assets().await.unwrap(), assets);
    }

    #[tokio::test]
    async fn test_reads_float_amounts() {
        let env = TestEnvironment::new().await.unwrap();
        fs::write(env.connection.assets_file_path(), "項目,金額\n現金,1500.0\n証券,\"20,000\"\n").unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());

        let assets = repo.load_assets().await.unwrap();
        assert_eq!(assets, vec![Asset::new(CASH_ASSET, 1500), Asset::new("証券", 20000)]);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_serialised() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = CsvAssetRepository::new(env.connection.clone());

        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.update_asset(CASH_ASSET, -100).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.load_assets().await.unwrap(), vec![Asset::new(CASH_ASSET, -1000)]);
    }
}
