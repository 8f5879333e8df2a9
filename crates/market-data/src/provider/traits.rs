//! NAV provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::NavMap;

/// Source of the full mutual-fund NAV table.
///
/// Implementations return every scheme they know about in one call; lookups
/// by scheme code or name are done by the caller on the returned map.
#[async_trait]
pub trait NavProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. `"AMFI"`.
    fn id(&self) -> &'static str;

    /// Fetch the latest NAV of every scheme.
    async fn fetch_all_navs(&self) -> Result<NavMap, MarketDataError>;
}
