/// Failures of the session-scoped key/value store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("store quota exceeded writing {key}")]
    QuotaExceeded { key: String },
}
