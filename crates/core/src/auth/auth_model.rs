use serde::{Deserialize, Serialize};

/// The user currently signed in to the cloud account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Bearer token presented to the remote store. Never serialized back out.
    #[serde(default, skip_serializing)]
    pub id_token: Option<String>,
}
