//! Upload para o host de mídia (Cloudinary, preset não assinado)
//!
//! O host devolve uma URL pública; nenhum binário fica na plataforma.
//! Upload que não devolve `secure_url` é `FalhaUpload` e a ação do operador
//! termina ali, sem retry.

use crate::config::settings::CloudinarySettings;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use reqwest::multipart;

const CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

#[derive(Clone)]
pub struct MidiaService {
    http: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
    base_url: String,
}

impl MidiaService {
    pub fn new(http: reqwest::Client, settings: &CloudinarySettings) -> Self {
        Self {
            http,
            cloud_name: settings.cloud_name.clone(),
            upload_preset: settings.upload_preset.clone(),
            base_url: CLOUDINARY_BASE_URL.to_string(),
        }
    }

    /// Substitui a URL base (testes)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sobe o arquivo e devolve a URL pública
    pub async fn upload(
        &self,
        nome_arquivo: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<String> {
        let resource_type = resource_type_para(content_type);
        let url = format!(
            "{}/{}/{}/upload",
            self.base_url, self.cloud_name, resource_type
        );

        let parte = multipart::Part::bytes(bytes)
            .file_name(nome_arquivo.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::ValidationError(format!("content-type inválido: {}", e)))?;

        let form = multipart::Form::new()
            .part("file", parte)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log_error(&format!("Upload falhou ({}): {}", status, error_text));
            return Err(AppError::FalhaUpload(format!(
                "host de mídia respondeu {}",
                status
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let secure_url = body
            .get("secure_url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::FalhaUpload("resposta do host de mídia sem secure_url".to_string())
            })?;

        log_upload_concluido(secure_url);
        Ok(secure_url.to_string())
    }
}

/// Caminho do recurso no Cloudinary conforme o MIME do arquivo
fn resource_type_para(content_type: &str) -> &'static str {
    if content_type.starts_with("video") {
        "video"
    } else if content_type.starts_with("image") {
        "image"
    } else {
        "raw"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn service(base_url: String) -> MidiaService {
        MidiaService::new(
            reqwest::Client::new(),
            &CloudinarySettings {
                cloud_name: "demo".to_string(),
                upload_preset: "vitrine_unsigned".to_string(),
            },
        )
        .with_base_url(base_url)
    }

    #[test]
    fn test_resource_type() {
        assert_eq!(resource_type_para("image/jpeg"), "image");
        assert_eq!(resource_type_para("video/mp4"), "video");
        assert_eq!(resource_type_para("application/pdf"), "raw");
    }

    #[tokio::test]
    async fn test_upload_devolve_secure_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/demo/image/upload");
            then.status(200).json_body(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/image/upload/foto.jpg"
            }));
        });

        let url = service(server.base_url())
            .upload("foto.jpg", "image/jpeg", vec![1, 2, 3])
            .await
            .unwrap();

        mock.assert();
        assert_eq!(url, "https://res.cloudinary.com/demo/image/upload/foto.jpg");
    }

    #[tokio::test]
    async fn test_upload_sem_secure_url_e_falha_upload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/demo/raw/upload");
            then.status(200).json_body(serde_json::json!({ "public_id": "x" }));
        });

        let erro = service(server.base_url())
            .upload("doc.pdf", "application/pdf", vec![1])
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::FalhaUpload(_)));
    }
}
