//! Background scheduler for periodic price refresh.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first refresh, to let the server fully start.
const INITIAL_DELAY_SECS: u64 = 60;

/// Starts the background price refresh scheduler.
pub fn start_price_refresh_scheduler(state: Arc<AppState>, period: Duration) {
    tokio::spawn(async move {
        info!("Price refresh scheduler started ({}s interval)", period.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate.
        let mut refresh_interval = interval(period);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    info!("Running scheduled price refresh...");

    match state.price_refresh_service.refresh_all_prices().await {
        Ok(result) => info!(
            "Scheduled price refresh completed: {} updated, {} skipped",
            result.updated, result.skipped
        ),
        Err(e) => warn!("Scheduled price refresh failed: {}", e),
    }
}
