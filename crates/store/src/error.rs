use thiserror::Error;

/// Failure of a storage backend or of the blob encoding.
///
/// Never surfaces through the store API: the store logs it and either reseeds
/// (on load) or keeps working in memory (on save).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite storage failure: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("failed to encode or decode `{key}`: {source}")]
    Codec {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt value stored under `{key}`: {reason}")]
    Corrupt { key: &'static str, reason: String },
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn codec(key: &'static str, source: serde_json::Error) -> Self {
        Self::Codec { key, source }
    }

    pub fn corrupt(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key,
            reason: reason.into(),
        }
    }
}
