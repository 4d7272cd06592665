use crate::model::{RecommendError, ValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Recommendation failed: {0}")]
    Recommendation(String),
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::Validation(e) => ApiError::Validation(e),
            RecommendError::Provider(e) => ApiError::Recommendation(e.to_string()),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Recommendation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the user; provider details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(ValidationError::MissingField(_)) => {
                "Все поля обязательны для заполнения".to_string()
            }
            ApiError::Validation(ValidationError::InvalidAge(_)) => "Некорректный возраст".to_string(),
            ApiError::Validation(ValidationError::InvalidGrade(_)) => "Некорректный класс".to_string(),
            ApiError::Validation(ValidationError::InvalidEnglishLevel(_)) => {
                "Некорректный уровень английского".to_string()
            }
            ApiError::Validation(ValidationError::InvalidEssaySkills(_)) => {
                "Некорректный уровень навыков написания эссе".to_string()
            }
            ApiError::MalformedPayload(_) => "Некорректный формат запроса".to_string(),
            ApiError::NotFound(message) => message.to_string(),
            ApiError::Recommendation(_) => "Ошибка при получении рекомендаций".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Error getting recommendations: {}", self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
