use customernexus_core::Error as CoreError;
use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Procedure {procedure} returned no rows")]
    EmptyResult { procedure: String },

    #[error("Column '{column}' could not be read: {message}")]
    UnreadableColumn { column: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::storage(err.to_string())
    }
}

/// Collapse an internal `anyhow` chain into the core error at the trait seam
pub(crate) fn into_core(err: anyhow::Error) -> CoreError {
    match err.downcast::<StorageError>() {
        Ok(storage) => storage.into(),
        Err(other) => CoreError::storage(format!("{other:#}")),
    }
}
