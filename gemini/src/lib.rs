//! Cliente da Generative Language API (Gemini)
//!
//! Este crate fornece só o que a plataforma precisa: enviar um prompt de
//! texto para o endpoint `generateContent` e devolver o texto gerado.
//! A montagem do prompt de anúncio fica no serviço que conhece o domínio.

use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Erros do cliente Gemini
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Erro de requisição HTTP
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro da API (status code não-2xx)
    #[error("Gemini API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Resposta sem o texto esperado em candidates/content/parts
    #[error("Invalid Gemini response: {0}")]
    InvalidResponse(String),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Cliente para o endpoint `generateContent`
#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Cria um novo cliente com o modelo padrão
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| GeminiError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Troca o modelo (`gemini-2.5-flash`, `gemini-pro`, ...)
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Substitui a URL base (testes)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Modelo configurado
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Envia o prompt e devolve o texto do primeiro candidato
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request_body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 1024,
            }
        });

        tracing::debug!("POST {}:generateContent ({} chars de prompt)", self.model, prompt.len());

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Gemini API error ({}): {}", status.as_u16(), error_body);

            let message = if let Ok(json) = serde_json::from_str::<Value>(&error_body) {
                json.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(&error_body)
                    .to_string()
            } else {
                error_body
            };

            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json_response: Value = response.json().await?;
        extract_text(&json_response)
    }
}

/// Extrai o texto de `candidates[0].content.parts[0].text`
fn extract_text(response: &Value) -> Result<String> {
    response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.get(0))
        .and_then(|part| part.get("text"))
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            GeminiError::InvalidResponse(format!(
                "missing candidates/content/parts text: {}",
                response
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("test-key").unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_extract_text() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Seu novo lar espera por você." }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        });

        assert_eq!(
            extract_text(&response).unwrap(),
            "Seu novo lar espera por você."
        );
    }

    #[test]
    fn test_extract_text_resposta_vazia() {
        let response = json!({ "candidates": [] });
        assert!(matches!(
            extract_text(&response),
            Err(GeminiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_content_contra_mock() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent")
                .query_param("key", "test-key");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Descrição gerada." }] }
                }]
            }));
        });

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.base_url());

        let text = client.generate_content("gere uma descrição").await.unwrap();

        mock.assert();
        assert_eq!(text, "Descrição gerada.");
    }
}
