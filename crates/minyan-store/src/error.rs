use thiserror::Error;

/// Store layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Document not found: collection={collection}, id={id}")]
    Missing { collection: String, id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    CoreError(#[from] minyan_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
