use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menuscan_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("{0}")]
    BadGateway(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, "E_VALIDATION"),
            ApiError::NotImplemented(_) => (StatusCode::NOT_IMPLEMENTED, "E_NOT_CONFIGURED"),
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "E_UPSTREAM"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = ApiErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::EmptyText | CoreError::InvalidImageType | CoreError::EmptyImage => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::MissingCredential => ApiError::NotImplemented(error.to_string()),
            CoreError::ImageAnalysisFailed(_) => {
                tracing::error!("{}", error);
                ApiError::BadGateway(error.to_string())
            }
        }
    }
}

/// JSON extractor that runs `validator` rules before reaching the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}
