use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use models::validation::ValidationErrors;
use service::errors::ServiceError;

pub const INVALID_PRODUCT_DATA: &str = "Invalid product data.";

/// JSON error envelope shared by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    /// Raw fault text; only set on 5xx.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field violations; only set on shape validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self { status, body: ErrorBody { message: message.into(), details, errors: None } }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody { message: INVALID_PRODUCT_DATA.into(), details: None, errors: Some(errors) },
        }
    }

    pub fn product_not_found(id: i32) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Product with ID {} not found.", id), None)
    }

    /// Business-rule failures become 400 with the rule's text; anything else is a
    /// 500 carrying `context` as message and the fault text as details.
    pub fn from_service(e: ServiceError, context: &str) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg, None),
            ServiceError::Db(fault) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, context, Some(fault)),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add("body", &rejection.body_text());
        Self::invalid(errors)
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text(), None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.body.message, details = ?self.body.details, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}
