//! Error types for mailgauge.

/// Top-level error type for one classification run.
///
/// Every variant is terminal for the invocation — nothing is retried
/// internally, and a run that fails never reaches the metric sink.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Event not in scope: {0}")]
    NotInScope(String),

    #[error("Mail store unavailable: {0}")]
    SourceUnavailable(#[from] StoreError),

    #[error("Malformed mail content: {0}")]
    MalformedContent(String),

    #[error("Metric sink unavailable: {0}")]
    SinkUnavailable(#[from] SinkError),
}

/// Mail store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Fetch of {bucket}/{key} failed: {reason}")]
    RequestFailed {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("Store returned status {status} for {bucket}/{key}")]
    UnexpectedStatus {
        bucket: String,
        key: String,
        status: u16,
    },
}

/// Metric sink errors.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Metric request failed: {0}")]
    RequestFailed(String),

    #[error("Metric endpoint returned status {0}")]
    UnexpectedStatus(u16),
}

/// Result type alias for the classifier.
pub type Result<T> = std::result::Result<T, Error>;
