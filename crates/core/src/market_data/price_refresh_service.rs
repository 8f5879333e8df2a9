use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::market_data_model::PriceRefreshResult;
use super::market_data_traits::{PriceRefreshServiceTrait, QuoteProviderTrait};
use super::nav_cache::NavCache;
use crate::assets::{Asset, AssetServiceTrait, AssetType};
use crate::errors::Result;

/// Refreshes `current_price` of every asset that has a market symbol.
pub struct PriceRefreshService {
    asset_service: Arc<dyn AssetServiceTrait>,
    nav_cache: Arc<NavCache>,
    quote_providers: Vec<Arc<dyn QuoteProviderTrait>>,
}

impl PriceRefreshService {
    pub fn new(
        asset_service: Arc<dyn AssetServiceTrait>,
        nav_cache: Arc<NavCache>,
        quote_providers: Vec<Arc<dyn QuoteProviderTrait>>,
    ) -> Self {
        Self {
            asset_service,
            nav_cache,
            quote_providers,
        }
    }

    async fn latest_price(&self, asset: &Asset, symbol: &str) -> Result<Option<f64>> {
        if asset.asset_type == AssetType::MutualFund {
            return Ok(self.nav_cache.get_nav(symbol).await?.map(|nav| nav.nav));
        }

        match self
            .quote_providers
            .iter()
            .find(|p| p.supports(asset.asset_type))
        {
            Some(provider) => provider.latest_price(symbol).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PriceRefreshServiceTrait for PriceRefreshService {
    async fn refresh_all_prices(&self) -> Result<PriceRefreshResult> {
        let mut result = PriceRefreshResult {
            success: true,
            ..Default::default()
        };

        for asset in self.asset_service.get_assets() {
            let (Some(id), Some(symbol)) = (asset.id, asset.symbol.as_deref()) else {
                continue;
            };
            if symbol.trim().is_empty() {
                continue;
            }

            match self.latest_price(&asset, symbol).await {
                Ok(Some(price)) if price > 0.0 => {
                    self.asset_service.update_price(id, price).await?;
                    debug!("Updated {} ({}) to {}", asset.name, symbol, price);
                    result.updated += 1;
                }
                Ok(_) => {
                    result.skipped += 1;
                }
                Err(e) => {
                    warn!("Failed to refresh price for {} ({}): {}", asset.name, symbol, e);
                    result.skipped += 1;
                }
            }
        }

        info!(
            "Price refresh finished: {} updated, {} skipped",
            result.updated, result.skipped
        );
        Ok(result)
    }
}
