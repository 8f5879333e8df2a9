//! DhanRakshak Market Data Crate
//!
//! Fetches public market data used to refresh local asset prices.
//!
//! # Overview
//!
//! Only mutual-fund NAVs are sourced here. The AMFI (Association of Mutual
//! Funds in India) publishes one large semicolon-delimited text file with the
//! latest NAV of every scheme; [`AmfiNavProvider`] downloads and parses it.
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |   NavProvider    | --> |  parse_amfi_nav  | --> |  MutualFundNav   |
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! Callers are expected to cache the result; the file is several megabytes.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{MutualFundNav, NavMap};
pub use provider::amfi::{parse_amfi_nav, AmfiNavProvider, AMFI_NAV_URL};
pub use provider::NavProvider;
