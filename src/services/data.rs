//! Hosted data service client
//!
//! Typed client for the hosted backend this site depends on: password-based
//! authentication issuing bearer sessions, row-level CRUD, and object storage
//! with public URLs. HTTP client setup, response parsing, and error handling
//! follow the same shape for every call.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::DataServiceConfig;
use crate::utils::errors::{BackofficeError, DataServiceError, Result};

/// An authenticated identity as reported by the data service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// A bearer session issued at successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Error body returned by the auth endpoints
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

/// Sort direction for row queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Filter/order/limit parameters for a row query
#[derive(Debug, Clone, Default)]
pub struct RowQuery {
    eq: Vec<(String, String)>,
    order: Option<(String, SortOrder)>,
    limit: Option<u32>,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter on a column
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.eq.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some((column.to_string(), SortOrder::Descending));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some((column.to_string(), SortOrder::Ascending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for (column, value) in &self.eq {
            params.push((column.clone(), format!("eq.{}", value)));
        }
        if let Some((column, order)) = &self.order {
            let direction = match order {
                SortOrder::Ascending => "asc",
                SortOrder::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{}", column, direction)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Client for the hosted data service
#[derive(Debug, Clone)]
pub struct DataService {
    client: Client,
    base_url: Url,
    public_key: String,
    secret_key: String,
}

impl DataService {
    /// Create a new DataService instance
    pub fn new(config: &DataServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("MIA-Backoffice/1.0")
            .build()
            .map_err(BackofficeError::Http)?;

        let base_url = Url::parse(&config.url)?;

        Ok(Self {
            client,
            base_url,
            public_key: config.public_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Authenticate with email and password, returning a bearer session.
    ///
    /// Auth endpoints are called with the low-privilege public key; a failed
    /// login surfaces the service's own error message.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        debug!(email = email, "Authenticating against data service");

        let response = self
            .client
            .post(self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.public_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let message = auth_error_message(response).await;
            return Err(BackofficeError::Authentication(message));
        }

        let session = response
            .json::<Session>()
            .await
            .map_err(|e| DataServiceError::InvalidResponse(e.to_string()))?;
        Ok(session)
    }

    /// Exchange a stored refresh token for a fresh bearer session
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let response = self
            .client
            .post(self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.public_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let message = auth_error_message(response).await;
            return Err(BackofficeError::Authentication(message));
        }

        let session = response
            .json::<Session>()
            .await
            .map_err(|e| DataServiceError::InvalidResponse(e.to_string()))?;
        Ok(session)
    }

    /// Resolve the identity behind a bearer token.
    ///
    /// Returns `None` for a token the service does not recognize; transport
    /// failures are surfaced as errors so callers can decide how to degrade.
    pub async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let response = self
            .client
            .get(self.endpoint("/auth/v1/user"))
            .header("apikey", &self.public_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let user = response
                    .json::<AuthUser>()
                    .await
                    .map_err(|e| DataServiceError::InvalidResponse(e.to_string()))?;
                Ok(Some(user))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DataServiceError::RequestFailed(format!("HTTP {}: {}", status, body)).into())
            }
        }
    }

    /// Revoke a bearer session
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("/auth/v1/logout"))
            .header("apikey", &self.public_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            // A failed logout leaves a session the caller already discarded.
            warn!(status = %response.status(), "Sign-out request was not accepted");
        }
        Ok(())
    }

    /// Query rows from a table
    pub async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RowQuery,
    ) -> Result<Vec<T>> {
        let request = self
            .client
            .get(self.endpoint(&format!("/rest/v1/{}", table)))
            .query(&query.to_params());

        let response = self.send_rest(request, table, "select").await?;
        let rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| DataServiceError::InvalidResponse(e.to_string()))?;
        Ok(rows)
    }

    /// Insert one row and return the stored representation
    pub async fn insert_row<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .client
            .post(self.endpoint(&format!("/rest/v1/{}", table)))
            .header("Prefer", "return=representation")
            .json(body);

        let response = self.send_rest(request, table, "insert").await?;
        let mut rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| DataServiceError::InvalidResponse(e.to_string()))?;

        rows.pop().ok_or_else(|| {
            DataServiceError::InvalidResponse("Insert returned no rows".to_string()).into()
        })
    }

    /// Update matching rows and return the stored representations.
    ///
    /// An empty result means no row matched the filters; callers distinguish
    /// not-found from a failed write precondition.
    pub async fn update_rows<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RowQuery,
        body: &B,
    ) -> Result<Vec<T>> {
        let request = self
            .client
            .patch(self.endpoint(&format!("/rest/v1/{}", table)))
            .query(&query.to_params())
            .header("Prefer", "return=representation")
            .json(body);

        let response = self.send_rest(request, table, "update").await?;
        let rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| DataServiceError::InvalidResponse(e.to_string()))?;
        Ok(rows)
    }

    /// Delete matching rows
    pub async fn delete_rows(&self, table: &str, query: &RowQuery) -> Result<()> {
        let request = self
            .client
            .delete(self.endpoint(&format!("/rest/v1/{}", table)))
            .query(&query.to_params());

        self.send_rest(request, table, "delete").await?;
        Ok(())
    }

    /// Upload an object to a storage bucket under the given key
    pub async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        debug!(bucket = bucket, key = key, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .post(self.endpoint(&format!("/storage/v1/object/{}/{}", bucket, key)))
            .header("apikey", &self.secret_key)
            .bearer_auth(&self.secret_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(
                DataServiceError::RequestFailed(format!("HTTP {}: {}", status, body)).into(),
            );
        }
        Ok(())
    }

    /// Delete an object from a storage bucket
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/storage/v1/object/{}/{}", bucket, key)))
            .header("apikey", &self.secret_key)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(
                DataServiceError::RequestFailed(format!("HTTP {}: {}", status, body)).into(),
            );
        }
        Ok(())
    }

    /// Public retrieval URL for a stored object
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/public/{}/{}", bucket, key))
    }

    /// Attach row-access credentials and send, mapping failures uniformly
    async fn send_rest(
        &self,
        request: RequestBuilder,
        table: &str,
        operation: &str,
    ) -> Result<reqwest::Response> {
        let response = request
            .header("apikey", &self.secret_key)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            crate::utils::logging::log_data_service_error(
                operation,
                table,
                &format!("HTTP {}: {}", status, body),
            );
            return Err(
                DataServiceError::RequestFailed(format!("HTTP {}: {}", status, body)).into(),
            );
        }

        Ok(response)
    }
}

/// Map reqwest transport failures onto data service errors
fn map_transport_error(e: reqwest::Error) -> BackofficeError {
    if e.is_timeout() {
        BackofficeError::DataService(DataServiceError::Timeout)
    } else if e.is_connect() {
        BackofficeError::DataService(DataServiceError::ServiceUnavailable)
    } else {
        BackofficeError::DataService(DataServiceError::RequestFailed(e.to_string()))
    }
}

/// Pull the service's own message out of an auth error response
async fn auth_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<AuthErrorBody>(&text) {
        if let Some(message) = body.error_description.or(body.msg).or(body.message) {
            return message;
        }
    }
    format!("HTTP {}: {}", status, text)
}
