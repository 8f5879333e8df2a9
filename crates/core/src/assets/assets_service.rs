use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::assets_model::{Asset, AssetAllocation, AssetType, NewAsset, PortfolioSummary};
use super::assets_traits::AssetServiceTrait;
use crate::cas::CasHolding;
use crate::errors::{DatabaseError, Error, Result};
use crate::records::{RecordRepositoryTrait, RecordService, RecordStore};
use crate::utils::time_utils::Clock;

pub struct AssetService {
    store: RecordStore<Asset>,
    clock: Arc<dyn Clock>,
}

impl AssetService {
    pub fn new(repository: Arc<dyn RecordRepositoryTrait<Asset>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RecordStore::new(repository),
            clock,
        }
    }

    fn value_of_type(assets: &[Asset], asset_type: AssetType) -> f64 {
        assets
            .iter()
            .filter(|a| a.asset_type == asset_type)
            .map(Asset::current_value)
            .sum()
    }

    fn allocation(assets: &[Asset], net_worth: f64) -> Vec<AssetAllocation> {
        let mut by_type: HashMap<AssetType, f64> = HashMap::new();
        for asset in assets {
            *by_type.entry(asset.asset_type).or_insert(0.0) += asset.current_value();
        }

        let mut allocation: Vec<AssetAllocation> = AssetType::ALL
            .iter()
            .filter_map(|t| {
                let value = *by_type.get(t)?;
                if value <= 0.0 {
                    return None;
                }
                Some(AssetAllocation {
                    asset_type: *t,
                    value,
                    percentage: if net_worth > 0.0 {
                        value / net_worth * 100.0
                    } else {
                        0.0
                    },
                    color: t.color().to_string(),
                })
            })
            .collect();

        allocation.sort_by(|a, b| b.value.total_cmp(&a.value));
        allocation
    }

    fn holding_to_new_asset(holding: &CasHolding) -> NewAsset {
        let buy_price = match holding.cost_value {
            Some(cost) if holding.units > 0.0 => cost / holding.units,
            _ => holding.nav,
        };
        NewAsset {
            name: holding.scheme_name.clone(),
            symbol: None,
            asset_type: AssetType::MutualFund,
            quantity: holding.units,
            buy_price,
            current_price: holding.nav,
            purchase_date: None,
        }
    }
}

impl RecordService for AssetService {
    type Record = Asset;

    fn record_store(&self) -> &RecordStore<Asset> {
        &self.store
    }
}

#[async_trait]
impl AssetServiceTrait for AssetService {
    fn load_assets(&self) -> Result<()> {
        self.store.load()
    }

    fn get_assets(&self) -> Vec<Asset> {
        self.store.list()
    }

    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        let asset = new_asset.into_asset(self.clock.now_millis());
        self.store.create(asset).await
    }

    async fn update_asset(&self, mut asset: Asset) -> Result<Asset> {
        asset.updated_at = Some(self.clock.now_millis());
        self.store.update(asset).await
    }

    async fn update_price(&self, asset_id: i64, price: f64) -> Result<Asset> {
        let mut asset = self.store.find(asset_id).ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("Asset {}", asset_id)))
        })?;
        debug!(
            "Updating price of asset {} from {} to {}",
            asset_id, asset.current_price, price
        );
        asset.current_price = price;
        self.update_asset(asset).await
    }

    async fn delete_asset(&self, asset_id: i64) -> Result<usize> {
        self.store.delete(asset_id).await
    }

    fn get_portfolio_summary(&self) -> PortfolioSummary {
        let assets = self.store.list();

        let net_worth: f64 = assets.iter().map(Asset::current_value).sum();
        let total_invested: f64 = assets.iter().map(Asset::invested_value).sum();
        let total_gain = net_worth - total_invested;
        let gain_percentage = if total_invested > 0.0 {
            total_gain / total_invested * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            net_worth,
            total_invested,
            total_gain,
            gain_percentage,
            stocks_value: Self::value_of_type(&assets, AssetType::Stock),
            mutual_funds_value: Self::value_of_type(&assets, AssetType::MutualFund),
            allocation: Self::allocation(&assets, net_worth),
        }
    }

    async fn import_cas_holdings(&self, holdings: &[CasHolding]) -> Result<usize> {
        let now = self.clock.now_millis();
        let assets: Vec<Asset> = holdings
            .iter()
            .map(|h| Self::holding_to_new_asset(h).into_asset(now))
            .collect();
        let inserted = self.store.insert_many(assets).await?;
        info!("Imported {} mutual fund holdings from CAS", inserted);
        Ok(inserted)
    }
}
