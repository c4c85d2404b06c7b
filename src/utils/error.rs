use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Transação, imóvel, cliente ou corretor inexistente
    NaoEncontrado(String),
    /// Tipo de processo fora da tabela fixa de modelos de checklist
    ModeloDesconhecido(String),
    /// O host de mídia não devolveu uma URL utilizável
    FalhaUpload(String),
    /// Escrita rejeitada pelo banco de documentos
    EscritaRemota(String),
    ValidationError(String),
    NaoAutorizado(String),
    ConfigError(String),
    JsonError(serde_json::Error),
    HttpError(reqwest::Error),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NaoEncontrado(msg) => write!(f, "Não encontrado: {}", msg),
            AppError::ModeloDesconhecido(msg) => write!(f, "Modelo de processo desconhecido: {}", msg),
            AppError::FalhaUpload(msg) => write!(f, "Falha no upload: {}", msg),
            AppError::EscritaRemota(msg) => write!(f, "Falha de escrita no banco de documentos: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::NaoAutorizado(msg) => write!(f, "Não autorizado: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::JsonError(err) => write!(f, "JSON error: {}", err),
            AppError::HttpError(err) => write!(f, "HTTP error: {}", err),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err)
    }
}

impl From<firestore::FirestoreError> for AppError {
    fn from(err: firestore::FirestoreError) -> Self {
        match err {
            firestore::FirestoreError::NotFound(msg) => AppError::NaoEncontrado(msg),
            other => AppError::EscritaRemota(other.to_string()),
        }
    }
}

impl From<gemini::GeminiError> for AppError {
    fn from(err: gemini::GeminiError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NaoEncontrado(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ModeloDesconhecido(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::FalhaUpload(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::EscritaRemota(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NaoAutorizado(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::JsonError(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::HttpError(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
