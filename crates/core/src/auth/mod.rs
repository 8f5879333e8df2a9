//! Signed-in identity as seen by the rest of the core.

mod auth_model;
mod auth_traits;

pub use auth_model::Identity;
pub use auth_traits::AuthProviderTrait;
