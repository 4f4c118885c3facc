use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo ausente, JSON quebrado ou campo faltando/com tipo errado
    #[error("Invalid request body: {reason}")]
    InvalidPayload { status: StatusCode, reason: String },

    #[error("Customer not found")]
    CustomerNotFound,

    // Falha de leitura/gravação (ou arquivo corrompido) da planilha do CRM
    #[error("Storage error: {0}")]
    StorageError(String),

    // Chave ausente, API fora do ar, timeout ou resposta inválida
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

// Mantém o status escolhido pelo axum (400, 415 ou 422), mas com o corpo no nosso formato
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidPayload {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::StorageError(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::StorageError(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::ExternalServiceError(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::InternalServerError(anyhow::Error::new(e))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPayload { status, .. } => *status,
            AppError::CustomerNotFound => StatusCode::NOT_FOUND,
            AppError::StorageError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Devolve os detalhes da validação campo a campo
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors.iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "One or more fields are invalid.",
                "detail": details,
            }));
            return (status, body).into_response();
        }

        let (error_message, detail) = match &self {
            AppError::InvalidPayload { reason, .. } => ("Invalid request body", reason.clone()),
            AppError::CustomerNotFound => ("Customer not found", "Customer not found".to_string()),
            AppError::StorageError(reason) => ("Error accessing CRM data", reason.clone()),
            AppError::ExternalServiceError(reason) => ("Analysis service unavailable", reason.clone()),
            AppError::InternalServerError(e) => ("An unexpected error occurred", e.to_string()),
            AppError::ValidationError(_) => ("One or more fields are invalid.", String::new()),
        };

        // Todo 500 vai para o log com a mensagem completa
        if status.is_server_error() {
            tracing::error!("🔥 {}", self);
        }

        let body = Json(json!({ "error": error_message, "detail": detail }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(AppError::CustomerNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::StorageError("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ExternalServiceError("GROQ_API_KEY not configured".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn invalid_payload_keeps_status_and_reports_json() {
        let response = AppError::InvalidPayload {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            reason: "missing field `text_data`".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(body["detail"], "missing field `text_data`");
    }

    #[tokio::test]
    async fn error_body_carries_the_reason() {
        let response = AppError::ExternalServiceError("GROQ_API_KEY not configured".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "GROQ_API_KEY not configured");
    }
}
