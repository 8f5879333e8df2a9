//! DhanRakshak Cloud Sync - remote document store and sign-in session.
//!
//! This crate provides the Firestore REST client used by the core sync
//! engine, the JSON to Firestore document codec, and an in-process session
//! that publishes the signed-in identity.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dhanrakshak_cloud_sync::{FirestoreClient, SessionAuthProvider};
//!
//! let session = Arc::new(SessionAuthProvider::new());
//! let remote = FirestoreClient::new("https://firestore.googleapis.com", "my-project", session.clone())?;
//! session.sign_in(identity);
//! let doc = remote.get_document("users/uid-1/settings/preferences").await?;
//! ```

mod codec;
mod error;
mod firestore;
mod session;

pub use codec::{decode_document, decode_value, encode_document, encode_value};
pub use error::{CloudSyncError, Result};
pub use firestore::{FirestoreClient, DEFAULT_FIRESTORE_BASE_URL};
pub use session::SessionAuthProvider;
