use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the input; the text is client-facing.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    /// The underlying text without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Validation(m) | ServiceError::Db(m) => m,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}
