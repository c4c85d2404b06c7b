//! Cliente HTTP para a API REST do Firestore

use crate::error::{FirestoreError, Result};
use reqwest::{Client as HttpClient, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Endpoint do metadata service do Google Cloud (Cloud Run / Compute Engine)
const METADATA_TOKEN_URL: &str = "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token?scopes=https://www.googleapis.com/auth/datastore";

/// Cliente para interagir com a API REST do Firestore
///
/// Todas as operações trabalham sobre o banco `(default)` do projeto.
#[derive(Clone)]
pub struct FirestoreClient {
    http_client: HttpClient,
    project_id: String,
    base_url: String,
    access_token: Option<String>,
}

impl FirestoreClient {
    /// Cria um novo cliente sem token (emulador / ambiente de desenvolvimento)
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(project_id: impl Into<String>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| FirestoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            project_id: project_id.into(),
            base_url: FIRESTORE_BASE_URL.to_string(),
            access_token: None,
        })
    }

    /// Cria um cliente com um access token já obtido
    pub fn with_access_token(project_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(project_id)?;
        client.access_token = Some(token.into());
        Ok(client)
    }

    /// Cria um cliente obtendo o token pelo metadata service do Google Cloud
    ///
    /// Funciona automaticamente no Cloud Run/Compute Engine. Fora do GCP o
    /// metadata service não responde e o construtor falha com `AuthError`.
    pub async fn with_metadata_token(project_id: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(project_id)?;
        client.access_token = Some(fetch_metadata_token(&client.http_client).await?);
        Ok(client)
    }

    /// Substitui a URL base (testes / emulador)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Raiz de documentos do banco: `{base}/projects/{p}/databases/(default)/documents`
    pub fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    /// ID do projeto configurado
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub(crate) async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self.authorize(self.http_client.get(url)).send().await?;
        self.handle_response(response).await
    }

    pub(crate) async fn post(&self, url: &str, body: &Value) -> Result<Response> {
        tracing::debug!("POST {}", url);
        let response = self
            .authorize(self.http_client.post(url))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn patch(&self, url: &str, body: &Value) -> Result<Response> {
        tracing::debug!("PATCH {}", url);
        let response = self
            .authorize(self.http_client.patch(url))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<Response> {
        tracing::debug!("DELETE {}", url);
        let response = self.authorize(self.http_client.delete(url)).send().await?;
        self.handle_response(response).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Processa a resposta HTTP e traduz erros da API
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("Firestore API error ({}): {}", status_code, error_body);

        // Tentar extrair a mensagem do envelope de erro padrão do Google
        let message = if let Ok(json) = serde_json::from_str::<Value>(&error_body) {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or(&error_body)
                .to_string()
        } else {
            error_body
        };

        if status_code == 404 {
            Err(FirestoreError::NotFound(message))
        } else {
            Err(FirestoreError::ApiError {
                status: status_code,
                message,
            })
        }
    }
}

/// Obtém um access token pelo metadata service do Google Cloud
async fn fetch_metadata_token(client: &HttpClient) -> Result<String> {
    let response = client
        .get(METADATA_TOKEN_URL)
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .map_err(|e| FirestoreError::AuthError(format!("Failed to contact metadata service: {}", e)))?;

    if !response.status().is_success() {
        let error = response.text().await.unwrap_or_default();
        return Err(FirestoreError::AuthError(format!("Metadata service error: {}", error)));
    }

    #[derive(Deserialize)]
    struct TokenResponse {
        access_token: String,
    }

    let token_response: TokenResponse = response
        .json()
        .await
        .map_err(|e| FirestoreError::AuthError(format!("Failed to parse token response: {}", e)))?;

    Ok(token_response.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FirestoreClient::new("meu-projeto").unwrap();
        assert_eq!(client.project_id(), "meu-projeto");
        assert_eq!(
            client.documents_root(),
            "https://firestore.googleapis.com/v1/projects/meu-projeto/databases/(default)/documents"
        );
    }

    #[test]
    fn test_client_with_base_url() {
        let client = FirestoreClient::new("meu-projeto")
            .unwrap()
            .with_base_url("http://localhost:8089/v1");
        assert_eq!(
            client.documents_root(),
            "http://localhost:8089/v1/projects/meu-projeto/databases/(default)/documents"
        );
    }
}
