//! Database model for assets.

use diesel::prelude::*;
use std::str::FromStr;

use dhanrakshak_core::assets::{Asset, AssetType};
use dhanrakshak_core::Error;

/// Database model for assets
#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct AssetDB {
    pub id: i64,
    pub name: String,
    pub symbol: Option<String>,
    pub asset_type: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: f64,
    pub purchase_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// Insert model; a `None` id lets SQLite assign the next one.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
pub struct NewAssetDB {
    pub id: Option<i64>,
    pub name: String,
    pub symbol: Option<String>,
    pub asset_type: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: f64,
    pub purchase_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl TryFrom<AssetDB> for Asset {
    type Error = Error;

    fn try_from(db: AssetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(db.id),
            name: db.name,
            symbol: db.symbol,
            asset_type: AssetType::from_str(&db.asset_type)?,
            quantity: db.quantity,
            buy_price: db.buy_price,
            current_price: db.current_price,
            purchase_date: db.purchase_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Asset> for NewAssetDB {
    fn from(domain: Asset) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            symbol: domain.symbol,
            asset_type: domain.asset_type.as_str().to_string(),
            quantity: domain.quantity,
            buy_price: domain.buy_price,
            current_price: domain.current_price,
            purchase_date: domain.purchase_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl AssetDB {
    pub fn from_domain(id: i64, domain: Asset) -> Self {
        Self {
            id,
            name: domain.name,
            symbol: domain.symbol,
            asset_type: domain.asset_type.as_str().to_string(),
            quantity: domain.quantity,
            buy_price: domain.buy_price,
            current_price: domain.current_price,
            purchase_date: domain.purchase_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
