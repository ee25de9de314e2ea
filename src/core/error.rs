use thiserror::Error;

/// Maximum chars of a raw payload echoed into a decode diagnostic.
const PAYLOAD_SNIPPET_MAX_CHARS: usize = 400;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid history endpoint {url}: {source}")]
    Endpoint {
        url: String,
        source: url::ParseError,
    },

    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("failed to decode applications payload: {source}; body: {}", payload_snippet(.payload))]
    Decode {
        source: serde_json::Error,
        payload: String,
    },

    #[error("store failure during {operation}: {source}")]
    Store {
        operation: &'static str,
        source: rusqlite::Error,
    },

    #[error("application {app_id} has no attempts")]
    EmptyAttempts { app_id: String },
}

impl HistoryError {
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> HistoryError {
        move |source| HistoryError::Store { operation, source }
    }
}

fn payload_snippet(payload: &str) -> String {
    if payload.chars().count() > PAYLOAD_SNIPPET_MAX_CHARS {
        let cut: String = payload.chars().take(PAYLOAD_SNIPPET_MAX_CHARS).collect();
        format!("{}... [truncated]", cut)
    } else {
        payload.to_string()
    }
}
