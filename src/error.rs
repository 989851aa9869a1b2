use std::time::Duration;

use thiserror::Error;

/// Fatal, command-level failures. These terminate the current invocation
/// with a diagnostic; they are never produced while a batch is in flight.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("upstream provider error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("beatmap failure: {0}")]
    Beatmap(String),

    #[error("invalid hit-object document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Non-success response from a remote score/profile provider.
/// Not retried; fatal for the current command.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {provider} failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },
}

/// Failures scoped to a single batch entry. Recorded and excluded from the
/// result mapping; sibling entries are unaffected.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("invalid entry: {0}")]
    Input(String),

    #[error("failed to parse beatmap: {0}")]
    Parse(String),

    #[error("beatmap cache failure: {0}")]
    Cache(#[from] CacheError),

    #[error("entry timed out after {0:?}")]
    Timeout(Duration),

    #[error("calculator failure: {0}")]
    Calculator(String),

    #[error("batch was cancelled before the entry ran")]
    Cancelled,
}

/// Download/cache collaborator failure for one beatmap id.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download for beatmap {beatmap_id} returned status {status}")]
    Status {
        beatmap_id: i32,
        status: reqwest::StatusCode,
    },

    #[error("cache io failure: {0}")]
    Io(#[from] std::io::Error),
}
