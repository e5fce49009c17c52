use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] minyan_service::error::ServiceError),

    #[error(transparent)]
    StoreError(#[from] minyan_store::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] minyan_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
