use tokio::sync::watch;

use super::Identity;

/// Source of the signed-in identity.
pub trait AuthProviderTrait: Send + Sync {
    /// Identity at the time of the call, `None` when signed out.
    fn current_identity(&self) -> Option<Identity>;

    /// Receiver notified every time the identity changes.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
