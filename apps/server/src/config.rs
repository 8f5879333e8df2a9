use std::net::SocketAddr;
use std::time::Duration;

use dhanrakshak_cloud_sync::DEFAULT_FIRESTORE_BASE_URL;
use dhanrakshak_core::constants::NAV_CACHE_TTL_SECS;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_PRICE_REFRESH_SECS: u64 = 15 * 60;

/// Server settings read from `DR_*` environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow_origins: Vec<String>,
    pub request_timeout: Duration,
    /// Cloud sync is disabled when unset.
    pub firestore_project_id: Option<String>,
    pub firestore_base_url: String,
    /// Interval of the background price refresh, `None` when disabled.
    pub price_refresh_interval: Option<Duration>,
    pub nav_cache_ttl_secs: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_raw = env_or("DR_LISTEN_ADDR", DEFAULT_LISTEN_ADDR);
        let listen_addr = listen_raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid DR_LISTEN_ADDR {}, using {}", listen_raw, DEFAULT_LISTEN_ADDR);
            SocketAddr::from(([0, 0, 0, 0], 8080))
        });

        let cors_allow_origins = env_or("DR_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let firestore_project_id = std::env::var("DR_FIRESTORE_PROJECT_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let refresh_secs = env_u64("DR_PRICE_REFRESH_SECS", DEFAULT_PRICE_REFRESH_SECS);

        Self {
            listen_addr,
            db_path: env_or("DR_DB_PATH", DEFAULT_DB_PATH),
            cors_allow_origins,
            request_timeout: Duration::from_millis(env_u64(
                "DR_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )),
            firestore_project_id,
            firestore_base_url: env_or("DR_FIRESTORE_BASE_URL", DEFAULT_FIRESTORE_BASE_URL),
            price_refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            nav_cache_ttl_secs: env_u64("DR_NAV_CACHE_TTL_SECS", NAV_CACHE_TTL_SECS),
        }
    }
}
