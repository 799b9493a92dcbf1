use crate::application::{ApplicationResult, error::ApplicationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    fields: Vec<FieldError>,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let message = err.to_string();
        match err {
            ApplicationError::InvalidParameter(_) | ApplicationError::PageOutOfRange(_) => {
                Self::new(StatusCode::BAD_REQUEST, message)
            }
            ApplicationError::InvalidInput(fields) => {
                let fields = fields
                    .iter()
                    .map(|entry| FieldError {
                        field: entry.field.clone(),
                        value: entry.value.clone(),
                    })
                    .collect();
                Self {
                    fields,
                    ..Self::new(StatusCode::BAD_REQUEST, message)
                }
            }
            ApplicationError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, message),
            ApplicationError::Duplicate(_) => Self::new(StatusCode::CONFLICT, message),
            ApplicationError::Unauthorized(_) => Self::new(StatusCode::UNAUTHORIZED, message),
            ApplicationError::AccessDenied(_) => Self::new(StatusCode::FORBIDDEN, message),
            ApplicationError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            fields: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ApplicationError> for HttpError {
    fn from(err: ApplicationError) -> Self {
        Self::from_error(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
            fields: self.fields,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Rejected payload fields; only present for invalid input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub value: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
