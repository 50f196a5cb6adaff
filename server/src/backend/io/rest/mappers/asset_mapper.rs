use crate::backend::domain::commands::assets::{AdjustAssetCommand, AdjustAssetResult};
use crate::backend::domain::models::{total_amount, Asset};
use shared::{AdjustAssetRequest, AdjustAssetResponse, AssetBalance, AssetListResponse};

/// Mapper between shared asset DTOs and domain assets.
pub struct AssetMapper;

impl AssetMapper {
    pub fn to_domain(dto: AssetBalance) -> Asset {
        Asset::new(dto.name, dto.amount)
    }

    pub fn to_dto(domain: Asset) -> AssetBalance {
        AssetBalance {
            name: domain.name,
            amount: domain.amount,
        }
    }

    pub fn to_list_dto(assets: Vec<Asset>) -> AssetListResponse {
        let total = total_amount(&assets);
        AssetListResponse {
            assets: assets.into_iter().map(Self::to_dto).collect(),
            total,
        }
    }

    pub fn to_adjust_command(request: AdjustAssetRequest) -> AdjustAssetCommand {
        AdjustAssetCommand {
            name: request.name,
            delta: request.delta,
        }
    }

    pub fn to_adjust_response(result: AdjustAssetResult) -> AdjustAssetResponse {
        AdjustAssetResponse {
            name: result.name,
            new_amount: result.new_amount,
        }
    }
}
