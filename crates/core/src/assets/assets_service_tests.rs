//! Unit tests for the asset service.

use super::*;
use crate::cas::CasHolding;
use crate::records::test_support::{FixedClock, InMemoryRepository};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap()))
}

fn new_asset(name: &str, asset_type: AssetType, quantity: f64, buy: f64, current: f64) -> NewAsset {
    NewAsset {
        name: name.to_string(),
        symbol: None,
        asset_type,
        quantity,
        buy_price: buy,
        current_price: current,
        purchase_date: None,
    }
}

fn service() -> (AssetService, Arc<InMemoryRepository<Asset>>) {
    let repository = Arc::new(InMemoryRepository::<Asset>::new());
    let service = AssetService::new(repository.clone(), clock());
    (service, repository)
}

#[tokio::test]
async fn test_create_asset_assigns_id_and_timestamps() {
    let (service, repository) = service();

    let asset = service
        .create_asset(new_asset("Infosys", AssetType::Stock, 10.0, 1400.0, 1500.0))
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap().timestamp_millis();
    assert_eq!(asset.id, Some(1));
    assert_eq!(asset.created_at, now);
    assert_eq!(asset.updated_at, Some(now));
    assert_eq!(repository.stored().len(), 1);
    assert_eq!(service.get_assets().len(), 1);
}

#[tokio::test]
async fn test_update_price_reloads_in_memory_assets() {
    let (service, _) = service();
    let asset = service
        .create_asset(new_asset("Gold ETF", AssetType::Gold, 2.0, 5000.0, 5000.0))
        .await
        .unwrap();

    service.update_price(asset.id.unwrap(), 5600.0).await.unwrap();

    assert_eq!(service.get_assets()[0].current_price, 5600.0);
}

#[tokio::test]
async fn test_update_price_unknown_asset_fails() {
    let (service, _) = service();
    assert!(service.update_price(42, 1.0).await.is_err());
}

#[tokio::test]
async fn test_delete_asset() {
    let (service, _) = service();
    let asset = service
        .create_asset(new_asset("FD", AssetType::Fd, 1.0, 100000.0, 100000.0))
        .await
        .unwrap();

    assert_eq!(service.delete_asset(asset.id.unwrap()).await.unwrap(), 1);
    assert!(service.get_assets().is_empty());
}

#[tokio::test]
async fn test_portfolio_summary_and_allocation() {
    let (service, _) = service();
    service
        .create_asset(new_asset("Infosys", AssetType::Stock, 10.0, 100.0, 150.0))
        .await
        .unwrap();
    service
        .create_asset(new_asset("Index Fund", AssetType::MutualFund, 100.0, 20.0, 30.0))
        .await
        .unwrap();
    service
        .create_asset(new_asset("Old Stock", AssetType::Stock, 0.0, 10.0, 10.0))
        .await
        .unwrap();

    let summary = service.get_portfolio_summary();

    assert_eq!(summary.net_worth, 4500.0);
    assert_eq!(summary.total_invested, 3000.0);
    assert_eq!(summary.total_gain, 1500.0);
    assert_eq!(summary.gain_percentage, 50.0);
    assert_eq!(summary.stocks_value, 1500.0);
    assert_eq!(summary.mutual_funds_value, 3000.0);

    assert_eq!(summary.allocation.len(), 2);
    assert_eq!(summary.allocation[0].asset_type, AssetType::MutualFund);
    assert!((summary.allocation[0].percentage - 66.666).abs() < 0.01);
    assert_eq!(summary.allocation[1].asset_type, AssetType::Stock);
    assert_eq!(summary.allocation[1].color, "#8b5cf6");
}

#[tokio::test]
async fn test_summary_of_empty_portfolio() {
    let (service, _) = service();
    let summary = service.get_portfolio_summary();
    assert_eq!(summary.net_worth, 0.0);
    assert_eq!(summary.gain_percentage, 0.0);
    assert!(summary.allocation.is_empty());
}

#[tokio::test]
async fn test_import_cas_holdings_creates_mutual_funds() {
    let (service, _) = service();
    let holdings = vec![
        CasHolding {
            folio_number: "12345".to_string(),
            scheme_name: "ABC Growth Fund".to_string(),
            amc_name: "ABC".to_string(),
            registrar: "CAMS".to_string(),
            units: 100.0,
            nav: 25.0,
            current_value: 2500.0,
            cost_value: Some(2000.0),
        },
        CasHolding {
            folio_number: "999".to_string(),
            scheme_name: "XYZ Debt Fund".to_string(),
            amc_name: "XYZ".to_string(),
            registrar: "CAMS".to_string(),
            units: 10.0,
            nav: 12.5,
            current_value: 125.0,
            cost_value: None,
        },
    ];

    let imported = service.import_cas_holdings(&holdings).await.unwrap();

    assert_eq!(imported, 2);
    let assets = service.get_assets();
    assert!(assets.iter().all(|a| a.asset_type == AssetType::MutualFund));
    assert!(assets.iter().all(|a| a.id.is_some()));
    assert_eq!(assets[0].name, "ABC Growth Fund");
    assert_eq!(assets[0].buy_price, 20.0);
    assert_eq!(assets[0].current_price, 25.0);
    assert_eq!(assets[1].buy_price, 12.5);
}

#[test]
fn test_asset_type_round_trips_through_str() {
    for asset_type in AssetType::ALL {
        assert_eq!(asset_type.as_str().parse::<AssetType>().unwrap(), asset_type);
    }
    assert!("BOND".parse::<AssetType>().is_err());
}

#[test]
fn test_asset_serializes_like_the_remote_document() {
    let asset = Asset {
        id: Some(7),
        name: "BTC".to_string(),
        symbol: Some("bitcoin".to_string()),
        asset_type: AssetType::Crypto,
        quantity: 0.5,
        buy_price: 100.0,
        current_price: 120.0,
        purchase_date: None,
        created_at: 1,
        updated_at: None,
    };

    let json = serde_json::to_value(&asset).unwrap();
    assert_eq!(json["type"], "CRYPTO");
    assert_eq!(json["buyPrice"], 100.0);
    assert_eq!(json["id"], 7);
    assert!(json.get("purchaseDate").is_none());
}
