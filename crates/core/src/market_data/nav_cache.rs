use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::RwLock;

use dhanrakshak_market_data::{MutualFundNav, NavMap, NavProvider};

use crate::constants::{NAV_CACHE_TTL_SECS, NAV_SEARCH_LIMIT};
use crate::errors::Result;
use crate::utils::time_utils::Clock;

struct CachedNavs {
    navs: Arc<NavMap>,
    fetched_at: i64,
}

/// Process-wide memo of the full mutual-fund NAV table.
///
/// The table is fetched on first use and again once it is older than the
/// configured lifetime, or after [`invalidate`](Self::invalidate).
pub struct NavCache {
    provider: Arc<dyn NavProvider>,
    clock: Arc<dyn Clock>,
    ttl_millis: i64,
    cached: RwLock<Option<CachedNavs>>,
}

impl NavCache {
    pub fn new(provider: Arc<dyn NavProvider>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl_secs(provider, clock, NAV_CACHE_TTL_SECS)
    }

    pub fn with_ttl_secs(
        provider: Arc<dyn NavProvider>,
        clock: Arc<dyn Clock>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            provider,
            clock,
            ttl_millis: (ttl_secs as i64).saturating_mul(1000),
            cached: RwLock::new(None),
        }
    }

    fn is_fresh(&self, cached: &CachedNavs) -> bool {
        self.clock.now_millis() - cached.fetched_at < self.ttl_millis
    }

    /// The full NAV table, fetched if missing or stale.
    pub async fn navs(&self) -> Result<Arc<NavMap>> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if self.is_fresh(cached) {
                return Ok(Arc::clone(&cached.navs));
            }
        }

        let mut guard = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(cached) = guard.as_ref() {
            if self.is_fresh(cached) {
                return Ok(Arc::clone(&cached.navs));
            }
        }

        debug!("Fetching NAV table from {}", self.provider.id());
        let navs = Arc::new(self.provider.fetch_all_navs().await?);
        info!("Cached {} mutual fund NAVs", navs.len());
        *guard = Some(CachedNavs {
            navs: Arc::clone(&navs),
            fetched_at: self.clock.now_millis(),
        });
        Ok(navs)
    }

    /// Drop the cached table so the next lookup fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    pub async fn get_nav(&self, scheme_code: &str) -> Result<Option<MutualFundNav>> {
        Ok(self.navs().await?.get(scheme_code).cloned())
    }

    /// NAVs for every known code in `scheme_codes`; unknown codes are left out.
    pub async fn get_navs(&self, scheme_codes: &[String]) -> Result<HashMap<String, MutualFundNav>> {
        let navs = self.navs().await?;
        Ok(scheme_codes
            .iter()
            .filter_map(|code| navs.get(code).map(|nav| (code.clone(), nav.clone())))
            .collect())
    }

    /// Schemes whose name contains `query`, ignoring case, ordered by scheme
    /// code and capped at twenty results.
    pub async fn search(&self, query: &str) -> Result<Vec<MutualFundNav>> {
        let navs = self.navs().await?;
        let needle = query.to_lowercase();
        let mut matches: Vec<&MutualFundNav> = navs
            .values()
            .filter(|nav| nav.scheme_name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.scheme_code.cmp(&b.scheme_code));
        Ok(matches
            .into_iter()
            .take(NAV_SEARCH_LIMIT)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::test_support::FixedClock;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use dhanrakshak_market_data::MarketDataError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        fetches: AtomicUsize,
        navs: NavMap,
    }

    impl CountingProvider {
        fn with_schemes(count: usize) -> Self {
            let navs = (0..count)
                .map(|i| {
                    let code = format!("{}", 100000 + i);
                    (
                        code.clone(),
                        MutualFundNav {
                            scheme_code: code,
                            scheme_name: format!("Sample Bluechip Fund {}", i),
                            nav: 10.0 + i as f64,
                            date: "16-Oct-2026".to_string(),
                            last_updated: 0,
                        },
                    )
                })
                .collect();
            Self {
                fetches: AtomicUsize::new(0),
                navs,
            }
        }
    }

    #[async_trait]
    impl NavProvider for CountingProvider {
        fn id(&self) -> &'static str {
            "TEST"
        }

        async fn fetch_all_navs(&self) -> std::result::Result<NavMap, MarketDataError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.navs.clone())
        }
    }

    fn setup(count: usize) -> (NavCache, Arc<CountingProvider>, Arc<FixedClock>) {
        let provider = Arc::new(CountingProvider::with_schemes(count));
        let clock = Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap()));
        let cache = NavCache::new(provider.clone(), clock.clone());
        (cache, provider, clock)
    }

    #[tokio::test]
    async fn test_cache_reused_within_ttl() {
        let (cache, provider, clock) = setup(3);
        cache.get_nav("100000").await.unwrap();
        clock.advance_secs(14 * 60);
        cache.get_nav("100001").await.unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);

        clock.advance_secs(2 * 60);
        cache.get_nav("100001").await.unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (cache, provider, _) = setup(1);
        cache.navs().await.unwrap();
        cache.invalidate().await;
        cache.navs().await.unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lookup_by_code() {
        let (cache, _, _) = setup(2);
        let nav = cache.get_nav("100001").await.unwrap().unwrap();
        assert_eq!(nav.nav, 11.0);
        assert!(cache.get_nav("999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_capped() {
        let (cache, _, _) = setup(30);
        let results = cache.search("BLUECHIP").await.unwrap();
        assert_eq!(results.len(), 20);
        assert_eq!(results[0].scheme_code, "100000");
        assert!(cache.search("gilt").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_navs_skips_unknown_codes() {
        let (cache, _, _) = setup(3);
        let codes = vec!["100000".to_string(), "nope".to_string(), "100002".to_string()];
        let found = cache.get_navs(&codes).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains_key("100002"));
    }
}
