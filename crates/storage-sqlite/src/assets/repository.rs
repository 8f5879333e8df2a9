use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use dhanrakshak_core::assets::Asset;
use dhanrakshak_core::errors::{Error, Result, ValidationError};
use dhanrakshak_core::records::RecordRepositoryTrait;

use super::model::{AssetDB, NewAssetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::assets;

pub(crate) fn load_assets(conn: &mut SqliteConnection) -> Result<Vec<Asset>> {
    assets::table
        .select(AssetDB::as_select())
        .order(assets::id.asc())
        .load::<AssetDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(Asset::try_from)
        .collect()
}

/// Insert rows keeping any identifiers they carry.
pub(crate) fn insert_asset_rows(conn: &mut SqliteConnection, rows: Vec<Asset>) -> Result<usize> {
    let mut inserted = 0;
    for row in rows {
        inserted += diesel::insert_into(assets::table)
            .values(NewAssetDB::from(row))
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(inserted)
}

pub(crate) fn clear_assets(conn: &mut SqliteConnection) -> Result<usize> {
    Ok(diesel::delete(assets::table)
        .execute(conn)
        .map_err(StorageError::from)?)
}

/// Repository for managing asset data in the database
pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecordRepositoryTrait<Asset> for AssetRepository {
    fn list(&self) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        load_assets(&mut conn)
    }

    fn get_by_id(&self, asset_id: i64) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;
        let row = assets::table
            .select(AssetDB::as_select())
            .find(asset_id)
            .first::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Asset::try_from(row)
    }

    async fn insert(&self, asset: Asset) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let mut row = NewAssetDB::from(asset);
                row.id = None;
                let created = diesel::insert_into(assets::table)
                    .values(&row)
                    .returning(AssetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Asset::try_from(created)
            })
            .await
    }

    async fn update(&self, asset: Asset) -> Result<Asset> {
        let asset_id = asset
            .id
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("id".to_string())))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let row = AssetDB::from_domain(asset_id, asset);
                let updated = diesel::update(assets::table.find(asset_id))
                    .set(&row)
                    .returning(AssetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Asset::try_from(updated)
            })
            .await
    }

    async fn delete(&self, asset_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(assets::table.find(asset_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_many(&self, rows: Vec<Asset>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_asset_rows(conn, rows))
            .await
    }

    async fn clear(&self) -> Result<usize> {
        self.writer.exec(clear_assets).await
    }
}
