use thiserror::Error;

/// Failures reading or writing the preference set
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored preferences are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored preferences use the legacy domain-list format")]
    LegacyFormat,
}

/// Failures finding the active tab or delivering a command to it
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("no active tab")]
    NoActiveTab,
    #[error("message delivery failed: {0}")]
    Delivery(String),
}
