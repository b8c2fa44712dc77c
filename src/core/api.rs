/// Comet Server admin API client
///
/// Every call is a form-encoded POST carrying the admin username, the
/// auth type and the raw password, as the server expects.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::config::Credentials;
use crate::utils::{
    join_url, AUTH_TYPE_PASSWORD, ENDPOINT_JOBS_FOR_DATE_RANGE, ENDPOINT_LIST_ACTIVE,
    ENDPOINT_LIST_USERS, ENDPOINT_META_VERSION,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response shape from {endpoint}: {detail}")]
    UnexpectedShape {
        endpoint: &'static str,
        detail: String,
    },
}

/// One entry of the dispatcher's live connection map
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiveConnection {
    pub reported_version: String,
}

/// One self-backup run record from the server metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelfBackupRun {
    pub last_run_success: bool,
    pub last_run_end: i64,
}

/// Server metadata from `meta/version`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerMeta {
    pub server_start_time: i64,
    pub version: String,
    pub self_backup: Vec<SelfBackupRun>,
}

/// The four admin API calls one poll cycle needs
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    /// Usernames on the server (only the count is used)
    async fn list_users(&self) -> Result<usize, ApiError>;

    /// Live client connections, keyed by connection id
    async fn list_active_connections(&self) -> Result<HashMap<String, LiveConnection>, ApiError>;

    /// Number of jobs between two epoch timestamps
    async fn jobs_for_date_range(&self, start: i64, end: i64) -> Result<usize, ApiError>;

    async fn server_meta(&self) -> Result<ServerMeta, ApiError>;
}

pub struct CometClient {
    client: Client,
    credentials: Credentials,
}

impl CometClient {
    pub fn new(credentials: Credentials, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("comet-collectd/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            credentials,
        })
    }

    /// POST to an admin endpoint and decode the JSON body
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        extra: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = join_url(self.credentials.base_url(), endpoint);

        let mut form: Vec<(&str, String)> = vec![
            ("Username", self.credentials.username().to_string()),
            ("AuthType", AUTH_TYPE_PASSWORD.to_string()),
            ("Password", self.credentials.password().to_string()),
        ];
        form.extend(extra.iter().cloned());

        debug!(endpoint, "admin API request");

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        trace!(endpoint, bytes = body.len(), "admin API response");

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl AdminApi for CometClient {
    async fn list_users(&self) -> Result<usize, ApiError> {
        let users: serde_json::Value = self.request(ENDPOINT_LIST_USERS, &[]).await?;
        collection_len(ENDPOINT_LIST_USERS, &users)
    }

    async fn list_active_connections(&self) -> Result<HashMap<String, LiveConnection>, ApiError> {
        self.request(ENDPOINT_LIST_ACTIVE, &[]).await
    }

    async fn jobs_for_date_range(&self, start: i64, end: i64) -> Result<usize, ApiError> {
        let jobs: serde_json::Value = self
            .request(
                ENDPOINT_JOBS_FOR_DATE_RANGE,
                &[("Start", start.to_string()), ("End", end.to_string())],
            )
            .await?;
        collection_len(ENDPOINT_JOBS_FOR_DATE_RANGE, &jobs)
    }

    async fn server_meta(&self) -> Result<ServerMeta, ApiError> {
        self.request(ENDPOINT_META_VERSION, &[]).await
    }
}

/// Length of a JSON array or object; anything else is a shape error
fn collection_len(endpoint: &'static str, value: &serde_json::Value) -> Result<usize, ApiError> {
    match value {
        serde_json::Value::Array(items) => Ok(items.len()),
        serde_json::Value::Object(map) => Ok(map.len()),
        other => Err(ApiError::UnexpectedShape {
            endpoint,
            detail: format!("expected array or object, got {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_len_counts_arrays_and_objects() {
        assert_eq!(collection_len("x", &json!(["alice", "bob"])).unwrap(), 2);
        assert_eq!(collection_len("x", &json!({"alice": {}, "bob": {}, "carol": {}})).unwrap(), 3);
        assert_eq!(collection_len("x", &json!([])).unwrap(), 0);
    }

    #[test]
    fn test_collection_len_rejects_scalars() {
        let err = collection_len(ENDPOINT_LIST_USERS, &json!("nope")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));
        assert!(err.to_string().contains("got string"));
    }

    #[test]
    fn test_server_meta_decodes_pascal_case() {
        let meta: ServerMeta = serde_json::from_value(json!({
            "Version": "22.4.1",
            "ServerStartTime": 1650000000,
            "SelfBackup": [
                {"LastRunSuccess": false, "LastRunEnd": 1650000100, "Index": 0},
                {"LastRunSuccess": true, "LastRunEnd": 1650000200}
            ],
            "Uptime": "ignored"
        }))
        .unwrap();

        assert_eq!(meta.version, "22.4.1");
        assert_eq!(meta.server_start_time, 1650000000);
        assert_eq!(meta.self_backup.len(), 2);
        assert!(meta.self_backup[1].last_run_success);
        assert_eq!(meta.self_backup[1].last_run_end, 1650000200);
    }

    #[test]
    fn test_server_meta_missing_field_is_error() {
        let result: Result<ServerMeta, _> = serde_json::from_value(json!({
            "Version": "22.4.1",
            "SelfBackup": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_live_connection_ignores_extra_fields() {
        let conns: HashMap<String, LiveConnection> = serde_json::from_value(json!({
            "c1": {"ReportedVersion": "22.4.1", "Username": "alice", "DeviceID": "d1"}
        }))
        .unwrap();
        assert_eq!(conns["c1"].reported_version, "22.4.1");
    }
}
