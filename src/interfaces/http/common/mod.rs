//! Response envelope and error mapping shared by all HTTP modules.

mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::booking::FieldErrors;
use crate::shared::errors::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Uniform response wrapper: `{success, data, error}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// A failure that still carries a payload, e.g. field errors.
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

/// Field-level rejection body returned with 422.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Field key to message, in form order
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
    /// First field in error; the one the view scrolls to
    pub focus: Option<String>,
}

impl ValidationFailure {
    pub fn new(errors: FieldErrors) -> Self {
        let focus = errors.focus().map(|f| f.key());
        Self { errors, focus }
    }
}

/// Domain errors rendered as HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::InvalidTransition(_) | DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::PaymentDeclined(_) => StatusCode::PAYMENT_REQUIRED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        match self.0 {
            DomainError::Validation(errors) => (
                status,
                Json(ApiResponse::failure(message, ValidationFailure::new(errors))),
            )
                .into_response(),
            _ => (status, Json(ApiResponse::<()>::error(message))).into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Field;

    #[test]
    fn status_mapping() {
        let cases = [
            (DomainError::session_not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::Validation(FieldErrors::new()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Conflict("busy".into()), StatusCode::CONFLICT),
            (DomainError::InvalidTransition("done".into()), StatusCode::CONFLICT),
            (DomainError::PaymentDeclined("no".into()), StatusCode::PAYMENT_REQUIRED),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn validation_failure_serializes_focus() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Cvc, "Please enter a valid CVC code");
        errors.insert(Field::GroupSize, "Minimum 2 people required");
        let json = serde_json::to_value(ValidationFailure::new(errors)).unwrap();
        assert_eq!(json["focus"], "groupSize");
        assert_eq!(json["errors"]["cvc"], "Please enter a valid CVC code");
    }
}
