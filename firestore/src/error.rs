//! Tipos de erro para o crate firestore

use thiserror::Error;

/// Erros do cliente Firestore
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// Erro de requisição HTTP
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API do Firestore (status code não-2xx)
    #[error("Firestore API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Documento não encontrado
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Documento com formato inesperado (fields ausentes, tipo errado)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Erro de autenticação (metadata service, token)
    #[error("Authentication failed: {0}")]
    AuthError(String),
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, FirestoreError>;
