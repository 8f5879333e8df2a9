//! Firestore REST client backing the cloud sync engine.
//!
//! Documents live under
//! `{base_url}/v1/projects/{project}/databases/(default)/documents/{path}`.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use dhanrakshak_core::auth::AuthProviderTrait;
use dhanrakshak_core::errors::Result as CoreResult;
use dhanrakshak_core::sync::{RemoteDocument, RemoteStoreTrait};

use crate::codec::{decode_document, encode_document};
use crate::error::{CloudSyncError, Result};

/// Public Firestore endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Documents requested per page when listing a collection.
const LIST_PAGE_SIZE: u32 = 300;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Client for one Firestore database, authorised with the signed-in user's
/// id token.
#[derive(Clone)]
pub struct FirestoreClient {
    client: reqwest::Client,
    documents_url: String,
    auth: Arc<dyn AuthProviderTrait>,
}

impl FirestoreClient {
    /// Create a client for `project_id`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, usually [`DEFAULT_FIRESTORE_BASE_URL`]
    /// * `project_id` - Firebase project holding the `users` tree
    /// * `auth` - source of the bearer token for each request
    pub fn new(
        base_url: &str,
        project_id: &str,
        auth: Arc<dyn AuthProviderTrait>,
    ) -> Result<Self> {
        if project_id.trim().is_empty() {
            return Err(CloudSyncError::invalid_request("Firestore project id is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            documents_url: format!(
                "{}/v1/projects/{}/databases/(default)/documents",
                base_url.trim_end_matches('/'),
                project_id
            ),
            auth,
        })
    }

    /// Full URL of a document or collection path.
    fn url(&self, path: &str) -> Result<String> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(CloudSyncError::invalid_request("empty document path"));
        }
        let encoded: Vec<String> = segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();
        Ok(format!("{}/{}", self.documents_url, encoded.join("/")))
    }

    fn headers(&self) -> Result<HeaderMap> {
        let token = self
            .auth
            .current_identity()
            .and_then(|identity| identity.id_token)
            .ok_or_else(|| CloudSyncError::auth("No signed-in user token"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| CloudSyncError::auth("Invalid id token format"))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    /// Parse a JSON response body, turning error statuses into [`CloudSyncError::Api`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Firestore response ({})", status);

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to deserialize Firestore response: {}", e);
            CloudSyncError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    pub async fn set(&self, path: &str, value: &Value) -> Result<()> {
        let url = self.url(path)?;
        let body = encode_document(value)?;
        debug!("Writing document {}", path);

        let response = self
            .client
            .patch(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        Self::parse_response::<Value>(response).await.map(|_| ())
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        let url = self.url(path)?;
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: Value = Self::parse_response(response).await?;
        decode_document(&document).map(Some)
    }

    /// Every document directly under a collection, following page tokens.
    pub async fn list(&self, collection_path: &str) -> Result<Vec<RemoteDocument>> {
        let url = self.url(collection_path)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .headers(self.headers()?)
                .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request.send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                break;
            }
            let page: ListDocumentsResponse = Self::parse_response(response).await?;

            for document in &page.documents {
                documents.push(RemoteDocument {
                    id: document_id(document)?,
                    data: decode_document(document)?,
                });
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} documents under {}", documents.len(), collection_path);
        Ok(documents)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        let response = self
            .client
            .delete(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::parse_response::<Value>(response).await.map(|_| ())
    }
}

/// Last segment of the document's resource name.
fn document_id(document: &Value) -> Result<String> {
    document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CloudSyncError::codec("document without a name"))
}

fn api_error(status: StatusCode, body: &str) -> CloudSyncError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if status == StatusCode::UNAUTHORIZED => {
            CloudSyncError::auth(parsed.error.message)
        }
        Ok(parsed) => CloudSyncError::api(
            status.as_u16(),
            format!("{}: {}", parsed.error.status, parsed.error.message),
        ),
        Err(_) => CloudSyncError::api(status.as_u16(), format!("Request failed: {}", body)),
    }
}

#[async_trait]
impl RemoteStoreTrait for FirestoreClient {
    async fn set_document(&self, path: &str, value: &Value) -> CoreResult<()> {
        Ok(self.set(path, value).await?)
    }

    async fn get_document(&self, path: &str) -> CoreResult<Option<Value>> {
        Ok(self.get(path).await?)
    }

    async fn list_documents(&self, collection_path: &str) -> CoreResult<Vec<RemoteDocument>> {
        Ok(self.list(collection_path).await?)
    }

    async fn delete_document(&self, path: &str) -> CoreResult<()> {
        Ok(self.delete(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionAuthProvider;
    use dhanrakshak_core::auth::Identity;
    use serde_json::json;

    fn client(session: Arc<SessionAuthProvider>) -> FirestoreClient {
        FirestoreClient::new("https://firestore.example.com/", "dhan-test", session).unwrap()
    }

    #[test]
    fn test_url_joins_and_encodes_segments() {
        let c = client(Arc::new(SessionAuthProvider::new()));
        assert_eq!(
            c.url("users/u 1/assets/7").unwrap(),
            "https://firestore.example.com/v1/projects/dhan-test/databases/(default)/documents/users/u%201/assets/7"
        );
        assert!(c.url("//").is_err());
    }

    #[test]
    fn test_empty_project_is_rejected() {
        let session = Arc::new(SessionAuthProvider::new());
        assert!(FirestoreClient::new(DEFAULT_FIRESTORE_BASE_URL, " ", session).is_err());
    }

    #[test]
    fn test_headers_need_a_token() {
        let session = Arc::new(SessionAuthProvider::new());
        let c = client(session.clone());
        assert!(matches!(c.headers(), Err(CloudSyncError::Auth(_))));

        session.sign_in(Identity {
            uid: "u1".to_string(),
            email: None,
            display_name: None,
            id_token: Some("tok".to_string()),
        });
        let headers = c.headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_document_id_is_last_name_segment() {
        let doc = json!({ "name": "projects/p/databases/(default)/documents/users/u/goals/12" });
        assert_eq!(document_id(&doc).unwrap(), "12");
        assert!(document_id(&json!({})).is_err());
    }

    #[test]
    fn test_api_error_mapping() {
        let body = r#"{"error":{"code":403,"status":"PERMISSION_DENIED","message":"Missing or insufficient permissions."}}"#;
        match api_error(StatusCode::FORBIDDEN, body) {
            CloudSyncError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "PERMISSION_DENIED: Missing or insufficient permissions.");
            }
            other => panic!("unexpected {:?}", other),
        }

        let unauth = r#"{"error":{"status":"UNAUTHENTICATED","message":"expired"}}"#;
        assert!(matches!(
            api_error(StatusCode::UNAUTHORIZED, unauth),
            CloudSyncError::Auth(_)
        ));
        assert!(matches!(
            api_error(StatusCode::BAD_GATEWAY, "<html>"),
            CloudSyncError::Api { status: 502, .. }
        ));
    }
}
