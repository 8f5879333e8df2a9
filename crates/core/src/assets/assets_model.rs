//! Asset domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ASSETS_COLLECTION;
use crate::errors::{Error, ValidationError};
use crate::records::SyncRecord;

/// Kind of holding an asset represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Stock,
    MutualFund,
    Gold,
    Epf,
    Ppf,
    Fd,
    Rd,
    Crypto,
    BankAccount,
}

impl AssetType {
    pub const ALL: [AssetType; 9] = [
        AssetType::Stock,
        AssetType::MutualFund,
        AssetType::Gold,
        AssetType::Epf,
        AssetType::Ppf,
        AssetType::Fd,
        AssetType::Rd,
        AssetType::Crypto,
        AssetType::BankAccount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::MutualFund => "MUTUAL_FUND",
            AssetType::Gold => "GOLD",
            AssetType::Epf => "EPF",
            AssetType::Ppf => "PPF",
            AssetType::Fd => "FD",
            AssetType::Rd => "RD",
            AssetType::Crypto => "CRYPTO",
            AssetType::BankAccount => "BANK_ACCOUNT",
        }
    }

    /// Display color used by allocation charts.
    pub fn color(&self) -> &'static str {
        match self {
            AssetType::Stock => "#8b5cf6",
            AssetType::MutualFund => "#06b6d4",
            AssetType::Gold => "#f59e0b",
            AssetType::Epf => "#10b981",
            AssetType::Ppf => "#22c55e",
            AssetType::Fd => "#3b82f6",
            AssetType::Rd => "#6366f1",
            AssetType::Crypto => "#ec4899",
            AssetType::BankAccount => "#14b8a6",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown asset type: {}",
                    s
                )))
            })
    }
}

/// Domain model representing an asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<i64>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Asset {
    pub fn current_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    pub fn invested_value(&self) -> f64 {
        self.quantity * self.buy_price
    }
}

impl SyncRecord for Asset {
    const COLLECTION: &'static str = ASSETS_COLLECTION;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Input model for creating a new asset
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: f64,
    #[serde(default)]
    pub purchase_date: Option<i64>,
}

impl NewAsset {
    pub fn into_asset(self, now: i64) -> Asset {
        Asset {
            id: None,
            name: self.name,
            symbol: self.symbol,
            asset_type: self.asset_type,
            quantity: self.quantity,
            buy_price: self.buy_price,
            current_price: self.current_price,
            purchase_date: self.purchase_date,
            created_at: now,
            updated_at: Some(now),
        }
    }
}

/// Share of net worth held in one asset type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
}

/// Aggregate figures over all assets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub net_worth: f64,
    pub total_invested: f64,
    pub total_gain: f64,
    pub gain_percentage: f64,
    pub stocks_value: f64,
    pub mutual_funds_value: f64,
    pub allocation: Vec<AssetAllocation>,
}
