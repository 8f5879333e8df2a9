use async_trait::async_trait;

use super::market_data_model::PriceRefreshResult;
use crate::assets::AssetType;
use crate::errors::Result;

/// Latest-price source for a non mutual-fund asset class.
#[async_trait]
pub trait QuoteProviderTrait: Send + Sync {
    fn id(&self) -> &'static str;

    fn supports(&self, asset_type: AssetType) -> bool;

    /// Latest price for `symbol`, `None` when the provider does not know it.
    async fn latest_price(&self, symbol: &str) -> Result<Option<f64>>;
}

#[async_trait]
pub trait PriceRefreshServiceTrait: Send + Sync {
    async fn refresh_all_prices(&self) -> Result<PriceRefreshResult>;
}
