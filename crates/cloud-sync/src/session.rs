use log::info;
use tokio::sync::watch;

use dhanrakshak_core::auth::{AuthProviderTrait, Identity};

/// Signed-in identity held in process memory.
///
/// Sign-in and sign-out publish the new identity to every subscriber.
pub struct SessionAuthProvider {
    sender: watch::Sender<Option<Identity>>,
}

impl SessionAuthProvider {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    pub fn sign_in(&self, identity: Identity) {
        info!("User {} signed in", identity.uid);
        self.sender.send_replace(Some(identity));
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.sender.send_replace(None) {
            info!("User {} signed out", previous.uid);
        }
    }
}

impl Default for SessionAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProviderTrait for SessionAuthProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(uid: &str) -> Identity {
        Identity {
            uid: uid.to_string(),
            email: Some(format!("{}@example.com", uid)),
            display_name: None,
            id_token: Some("token".to_string()),
        }
    }

    #[test]
    fn test_starts_signed_out() {
        let session = SessionAuthProvider::new();
        assert!(session.current_identity().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_sign_in_and_sign_out() {
        let session = SessionAuthProvider::new();
        let mut rx = session.subscribe();

        session.sign_in(identity("asha"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|i| i.uid.as_str()), Some("asha"));
        assert_eq!(session.current_identity().unwrap().uid, "asha");

        session.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
        assert!(session.current_identity().is_none());
    }
}
