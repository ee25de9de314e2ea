use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use url::Url;

use super::error::HistoryError;

/// Compiled-in default for a history server running on the local machine.
pub const DEFAULT_API_URL: &str = "http://localhost:18080/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Listing filter understood by the history server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Completed,
    Running,
}

impl AppStatus {
    pub fn as_query_value(self) -> &'static str {
        match self {
            AppStatus::Completed => "completed",
            AppStatus::Running => "running",
        }
    }
}

/// One execution attempt of an application, as reported by the server.
/// The epoch fields are carried verbatim from the payload and are never
/// recomputed from the string timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub start_time: String,
    pub end_time: String,
    pub last_updated: String,
    pub duration: u64,
    pub spark_user: String,
    pub completed: bool,
    pub start_time_epoch: i64,
    pub end_time_epoch: i64,
    pub last_updated_epoch: i64,
}

/// A named application owning its attempts in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub attempts: Vec<Attempt>,
}

pub struct HistoryClient {
    client: Client,
    base_url: Url,
}

impl HistoryClient {
    pub fn new(base_url: &str) -> Result<Self, HistoryError> {
        // Normalize to a trailing slash so joined paths land under the root.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalized).map_err(|source| HistoryError::Endpoint {
            url: base_url.to_string(),
            source,
        })?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| HistoryError::Transport {
                url: parsed.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn applications_url(&self, status: Option<AppStatus>) -> String {
        let mut url = format!("{}applications", self.base_url);
        if let Some(status) = status {
            url.push_str("?status=");
            url.push_str(status.as_query_value());
        }
        url
    }

    /// Single blocking GET with no retry. The HTTP status is not inspected:
    /// any reachable body is returned, and non-JSON error bodies surface
    /// downstream as decode diagnostics.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, HistoryError> {
        info!("GET {}", url);
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HistoryError::Transport {
                url: url.to_string(),
                source,
            })?;
        res.bytes().await.map_err(|source| HistoryError::Transport {
            url: url.to_string(),
            source,
        })
    }

    pub async fn fetch_applications(
        &self,
        status: Option<AppStatus>,
    ) -> Result<Bytes, HistoryError> {
        self.fetch(&self.applications_url(status)).await
    }

    /// Raw passthrough variant used by the filtered listings.
    pub async fn fetch_applications_text(
        &self,
        status: Option<AppStatus>,
    ) -> Result<String, HistoryError> {
        let body = self.fetch_applications(status).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Parse a response body into the application schema. Unknown fields are
/// ignored; missing required fields fail. The raw payload rides along in the
/// error so a diagnostic can show what actually came over the wire.
pub fn decode_applications(body: &[u8]) -> Result<Vec<Application>, HistoryError> {
    serde_json::from_slice(body).map_err(|source| HistoryError::Decode {
        source,
        payload: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Per-application counts keyed off each application's first attempt. The
/// units differ from the store aggregation, which counts attempt rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FirstAttemptSummary {
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
}

/// Classify each application by the completion flag of its first attempt.
/// An application with no attempts is an explicit error, never an index
/// out of bounds.
pub fn summarize_by_first_attempt(
    apps: &[Application],
) -> Result<FirstAttemptSummary, HistoryError> {
    let mut summary = FirstAttemptSummary {
        total: apps.len(),
        ..FirstAttemptSummary::default()
    };
    for app in apps {
        let first = app
            .attempts
            .first()
            .ok_or_else(|| HistoryError::EmptyAttempts {
                app_id: app.id.clone(),
            })?;
        if first.completed {
            summary.completed += 1;
        } else {
            summary.incomplete += 1;
        }
    }
    Ok(summary)
}
