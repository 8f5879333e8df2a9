//! SQLite storage implementation for assets.

mod model;
mod repository;

pub use model::{AssetDB, NewAssetDB};
pub use repository::AssetRepository;
pub(crate) use repository::{clear_assets, insert_asset_rows, load_assets};
