//! AMFI NAV provider.
//!
//! AMFI publishes the latest NAV of every Indian mutual-fund scheme as a
//! single text file. Data rows look like:
//!
//! ```text
//! Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date
//! 120503;INF200K01QX4;-;SBI Bluechip Fund - Direct Plan - Growth;92.1234;17-Oct-2026
//! ```
//!
//! Section headings (fund house names, scheme categories) and blank lines are
//! interleaved with the data rows and are skipped by the parser.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::{MutualFundNav, NavMap};
use crate::provider::NavProvider;

/// Public NAV file published by AMFI.
pub const AMFI_NAV_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";

/// Provider ID constant
const PROVIDER_ID: &str = "AMFI";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parses the AMFI NAV file.
///
/// A row is kept when it has at least five `;`-separated fields, the first
/// field is numeric, and the NAV parses to a strictly positive number.
/// Later rows with the same scheme code replace earlier ones.
pub fn parse_amfi_nav(data: &str) -> NavMap {
    let now = Utc::now().timestamp_millis();
    let mut funds = NavMap::new();

    for line in data.lines() {
        let parts: Vec<&str> = line.split(';').collect();
        if parts.len() < 5 || parts[0].trim().parse::<f64>().is_err() {
            continue;
        }

        let scheme_code = parts[0].trim().to_string();
        let scheme_name = parts[3].trim().to_string();
        let date = parts.get(5).map(|d| d.trim().to_string()).unwrap_or_default();

        let nav = match parts[4].trim().parse::<f64>() {
            Ok(nav) if nav > 0.0 => nav,
            _ => continue,
        };

        funds.insert(
            scheme_code.clone(),
            MutualFundNav {
                scheme_code,
                scheme_name,
                nav,
                date,
                last_updated: now,
            },
        );
    }

    funds
}

/// Downloads and parses the AMFI NAV file.
pub struct AmfiNavProvider {
    client: Client,
    url: String,
}

impl AmfiNavProvider {
    pub fn new() -> Self {
        Self::with_url(AMFI_NAV_URL)
    }

    /// Create a provider reading from a different location (mirrors, tests).
    pub fn with_url(url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.to_string(),
        }
    }
}

impl Default for AmfiNavProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NavProvider for AmfiNavProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_all_navs(&self) -> Result<NavMap, MarketDataError> {
        debug!("Fetching AMFI NAV file from {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("AMFI NAV request failed with status {}", status);
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("Request failed with status {}", status),
            ));
        }

        let body = response.text().await?;
        let funds = parse_amfi_nav(&body);
        debug!("Parsed {} schemes from AMFI NAV file", funds.len());
        Ok(funds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date\r
\r
Open Ended Schemes(Equity Scheme - Large Cap Fund)\r
\r
SBI Mutual Fund\r
120503;INF200K01QX4;-;SBI Bluechip Fund - Direct Plan - Growth;92.1234;17-Oct-2026\r
119551;INF179K01YV8;-;HDFC Index Fund-NIFTY 50 Plan - Direct Plan - Growth;215.5;17-Oct-2026\r
145552;INF204KB14I2;-;Nippon India Small Cap Fund;N.A.;17-Oct-2026\r
118989;INF769K01AX2;-;Mirae Asset Large Cap Fund;0;17-Oct-2026\r
";

    #[test]
    fn test_parse_keeps_numeric_rows_with_positive_nav() {
        let funds = parse_amfi_nav(SAMPLE);

        assert_eq!(funds.len(), 2);
        let sbi = funds.get("120503").unwrap();
        assert_eq!(sbi.scheme_name, "SBI Bluechip Fund - Direct Plan - Growth");
        assert_eq!(sbi.nav, 92.1234);
        assert_eq!(sbi.date, "17-Oct-2026");
        assert!(funds.contains_key("119551"));
    }

    #[test]
    fn test_parse_skips_headers_and_invalid_navs() {
        let funds = parse_amfi_nav(SAMPLE);

        assert!(!funds.contains_key("145552"));
        assert!(!funds.contains_key("118989"));
        assert!(!funds.contains_key("Scheme Code"));
    }

    #[test]
    fn test_parse_row_without_date() {
        let funds = parse_amfi_nav("100001;-;-;Some Fund;10.5");
        assert_eq!(funds.get("100001").unwrap().date, "");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_amfi_nav("").is_empty());
    }
}
