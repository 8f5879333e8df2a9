use async_trait::async_trait;

use super::assets_model::{Asset, NewAsset, PortfolioSummary};
use crate::cas::CasHolding;
use crate::errors::Result;

/// Trait defining the contract for Asset service operations.
#[async_trait]
pub trait AssetServiceTrait: Send + Sync {
    /// Reload the in-memory assets from the local store.
    fn load_assets(&self) -> Result<()>;
    fn get_assets(&self) -> Vec<Asset>;
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset>;
    /// Overwrites the asset and stamps `updated_at`.
    async fn update_asset(&self, asset: Asset) -> Result<Asset>;
    async fn update_price(&self, asset_id: i64, price: f64) -> Result<Asset>;
    async fn delete_asset(&self, asset_id: i64) -> Result<usize>;
    fn get_portfolio_summary(&self) -> PortfolioSummary;
    /// Adds one mutual-fund asset per parsed statement holding.
    async fn import_cas_holdings(&self, holdings: &[CasHolding]) -> Result<usize>;
}
