//! Market prices for local assets: the cached mutual-fund NAV table and the
//! price refresh that applies it.

mod market_data_model;
mod market_data_traits;
mod nav_cache;
mod price_refresh_service;

pub use market_data_model::PriceRefreshResult;
pub use market_data_traits::{PriceRefreshServiceTrait, QuoteProviderTrait};
pub use nav_cache::NavCache;
pub use price_refresh_service::PriceRefreshService;

pub use dhanrakshak_market_data::{MutualFundNav, NavMap, NavProvider};
