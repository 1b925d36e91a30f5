// src/common/error.rs

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Parâmetros de consulta inválidos: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Período personalizado exige data inicial e data final")]
    CustomRangeRequired,

    #[error("Data inicial posterior à data final")]
    InvalidDateRange,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // Datas fora do RFC 3339 e afins: mesmo formato das falhas de validação.
            AppError::InvalidQuery(rejection) => {
                let body = Json(json!({
                    "error": "Um ou mais parâmetros da consulta são inválidos.",
                    "details": { "query": [rejection.body_text()] },
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CustomRangeRequired => (
                StatusCode::BAD_REQUEST,
                "O período 'custom' exige os parâmetros startDate e endDate.",
            ),
            AppError::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                "A data inicial deve ser anterior ou igual à data final.",
            ),

            // DatabaseError e InternalServerError viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_errors_are_bad_requests() {
        assert_eq!(
            AppError::CustomRangeRequired.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidDateRange.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unexpected_errors_are_hidden_behind_500() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool esgotado"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
