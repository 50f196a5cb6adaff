//! Asset balances: listing, totals, single adjustments and table edits.

use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::commands::assets::{AdjustAssetCommand, AdjustAssetResult};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::{total_amount, Asset};
use crate::backend::storage::{AssetStorage, Connection};

#[derive(Clone)]
pub struct AssetService<C: Connection> {
    asset_repository: C::AssetRepository,
}

impl<C: Connection> AssetService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            asset_repository: connection.create_asset_repository(),
        }
    }

    pub async fn list_assets(&self) -> Result<Vec<Asset>> {
        self.asset_repository.load_assets().await
    }

    pub async fn total_assets(&self) -> Result<i64> {
        let assets = self.asset_repository.load_assets().await?;
        Ok(total_amount(&assets))
    }

    pub async fn update_asset(&self, command: AdjustAssetCommand) -> Result<AdjustAssetResult> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyAssetName.into());
        }

        info!("Adjusting asset {} by {}", name, command.delta);
        let new_amount = self.asset_repository.update_asset(name, command.delta).await?;

        Ok(AdjustAssetResult {
            name: name.to_string(),
            new_amount,
        })
    }

    /// Overwrite the asset table. Names are trimmed and must be unique.
    pub async fn replace_assets(&self, assets: Vec<Asset>) -> Result<Vec<Asset>> {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(assets.len());

        for asset in assets {
            let name = asset.name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::EmptyAssetName.into());
            }
            if !seen.insert(name.clone()) {
                return Err(DomainError::DuplicateAssetName(name).into());
            }
            cleaned.push(Asset::new(name, asset.amount));
        }

        self.asset_repository.save_assets(&cleaned).await?;
        info!("Saved {} assets, total {}", cleaned.len(), total_amount(&cleaned));
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::CASH_ASSET;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use crate::backend::storage::CsvConnection;

    async fn setup() -> (TestEnvironment, AssetService<CsvConnection>) {
        let env = TestEnvironment::new().await.unwrap();
        let service = AssetService::new(Arc::new(env.connection.clone()));
        (env, service)
    }

    #[tokio::test]
    async fn test_defaults_and_total() {
        let (_env, service) = setup().await;

        assert_eq!(service.list_assets().await.unwrap(), vec![Asset::new(CASH_ASSET, 0)]);
        assert_eq!(service.total_assets().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_then_adjust() {
        let (_env, service) = setup().await;

        service
            .replace_assets(vec![Asset::new(" 現金 ", 30000), Asset::new("銀行", 250000)])
            .await
            .unwrap();
        let result = service
            .update_asset(AdjustAssetCommand { name: "銀行".to_string(), delta: -50000 })
            .await
            .unwrap();

        assert_eq!(result.new_amount, 200000);
        assert_eq!(service.total_assets().await.unwrap(), 230000);
        assert_eq!(service.list_assets().await.unwrap()[0].name, CASH_ASSET);
    }

    #[tokio::test]
    async fn test_replace_rejects_bad_names() {
        let (_env, service) = setup().await;

        let err = service.replace_assets(vec![Asset::new("  ", 1)]).await.unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::EmptyAssetName));

        let err = service
            .replace_assets(vec![Asset::new("銀行", 1), Asset::new("銀行 ", 2)])
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::DuplicateAssetName("銀行".to_string()))
        );

        assert_eq!(service.list_assets().await.unwrap(), vec![Asset::new(CASH_ASSET, 0)]);
    }

    #[tokio::test]
    async fn test_adjust_requires_name() {
        let (_env, service) = setup().await;

        let err = service
            .update_asset(AdjustAssetCommand { name: String::new(), delta: 10 })
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>(), Some(&DomainError::EmptyAssetName));
    }
}
