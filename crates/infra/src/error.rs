use thiserror::Error;

use billing_core::DomainError;

use crate::external::ExternalError;
use crate::store::StoreError;

/// Failure of a repository or workflow call.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    External(#[from] ExternalError),

    #[error("{collection} {id} not found")]
    NotFound { collection: &'static str, id: String },
}

impl ServiceError {
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
