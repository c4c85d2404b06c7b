//! Documentos do Firestore: leitura, criação, patch com field mask e remoção

use crate::client::FirestoreClient;
use crate::error::{FirestoreError, Result};
use crate::value;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Um documento como devolvido pela API REST
///
/// `name` é o caminho completo do recurso
/// (`projects/{p}/databases/(default)/documents/transacoes/{id}`) e `fields`
/// carrega os valores ainda no formato do Firestore.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// ID do documento (último segmento do caminho)
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Segmentos do caminho depois de `/documents/`
    ///
    /// Para `.../documents/clients/abc/favoritos/xyz` devolve
    /// `["clients", "abc", "favoritos", "xyz"]`.
    pub fn path_segments(&self) -> Vec<&str> {
        match self.name.split_once("/documents/") {
            Some((_, path)) => path.split('/').collect(),
            None => Vec::new(),
        }
    }

    /// ID do documento pai dentro de uma coleção ancestral
    ///
    /// Em queries de collection group o dono da subcoleção vem do caminho,
    /// não dos campos: `owner_id("clients")` sobre
    /// `clients/{cid}/favoritos/{fid}` devolve `Some(cid)`.
    pub fn owner_id(&self, collection: &str) -> Option<&str> {
        let segments = self.path_segments();
        segments
            .iter()
            .position(|s| *s == collection)
            .and_then(|i| segments.get(i + 1))
            .copied()
    }

    /// Campos convertidos para JSON comum
    pub fn to_json(&self) -> Value {
        Value::Object(value::unwrap_fields(&self.fields))
    }

    /// Desserializa os campos em um tipo do domínio
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }

    /// Desserializa injetando o ID do documento no campo `id`
    pub fn deserialize_with_id<T: DeserializeOwned>(&self) -> Result<T> {
        let mut json = self.to_json();
        if let Some(map) = json.as_object_mut() {
            map.insert("id".to_string(), json!(self.id()));
        }
        Ok(serde_json::from_value(json)?)
    }
}

impl FirestoreClient {
    /// Leitura pontual: `path` relativo à raiz de documentos (`transacoes/abc`)
    pub async fn get_document(&self, path: &str) -> Result<Document> {
        let url = format!("{}/{}", self.documents_root(), path);
        let response = self.get(&url).await?;
        Ok(response.json().await?)
    }

    /// Cria um documento em `collection_path` (coleção ou subcoleção)
    ///
    /// Com `document_id = None` o Firestore gera o ID.
    pub async fn create_document(
        &self,
        collection_path: &str,
        document_id: Option<&str>,
        fields: &Map<String, Value>,
    ) -> Result<Document> {
        let mut url = format!("{}/{}", self.documents_root(), collection_path);
        if let Some(id) = document_id {
            url = format!("{}?documentId={}", url, id);
        }

        let body = json!({ "fields": value::wrap_fields(fields) });
        let response = self.post(&url, &body).await?;
        Ok(response.json().await?)
    }

    /// Update-by-merge: sobrescreve apenas os campos listados em `mask`
    pub async fn patch_document(
        &self,
        path: &str,
        fields: &Map<String, Value>,
        mask: &[&str],
    ) -> Result<Document> {
        let mask_params: Vec<String> = mask
            .iter()
            .map(|f| format!("updateMask.fieldPaths={}", f))
            .collect();
        let url = format!(
            "{}/{}?{}",
            self.documents_root(),
            path,
            mask_params.join("&")
        );

        let body = json!({ "fields": value::wrap_fields(fields) });
        let response = self.patch(&url, &body).await?;
        Ok(response.json().await?)
    }

    /// Remove um documento
    pub async fn delete_document(&self, path: &str) -> Result<()> {
        let url = format!("{}/{}", self.documents_root(), path);
        self.delete(&url).await?;
        Ok(())
    }
}

/// Serializa um valor do domínio para o mapa de campos de um documento
///
/// O campo `id` é descartado: o ID vive no caminho do recurso, não nos campos.
pub fn to_fields<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>> {
    let json = serde_json::to_value(value)?;
    let mut map = json
        .as_object()
        .cloned()
        .ok_or_else(|| FirestoreError::InvalidDocument("expected a JSON object".to_string()))?;
    map.remove("id");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> Document {
        Document {
            name: name.to_string(),
            fields: Map::new(),
            create_time: None,
            update_time: None,
        }
    }

    #[test]
    fn test_document_id() {
        let d = doc("projects/p/databases/(default)/documents/transacoes/tx-123");
        assert_eq!(d.id(), "tx-123");
    }

    #[test]
    fn test_owner_id_de_subcolecao() {
        let d = doc("projects/p/databases/(default)/documents/clients/cli-9/favoritos/fav-1");
        assert_eq!(d.owner_id("clients"), Some("cli-9"));
        assert_eq!(d.owner_id("favoritos"), Some("fav-1"));
        assert_eq!(d.owner_id("imoveis"), None);
    }

    #[test]
    fn test_deserialize_with_id() {
        #[derive(Debug, Deserialize)]
        struct Mini {
            id: String,
            titulo: String,
        }

        let mut fields = Map::new();
        fields.insert("titulo".to_string(), json!({ "stringValue": "Apto Jardins" }));
        let d = Document {
            name: "projects/p/databases/(default)/documents/imoveis/im-7".to_string(),
            fields,
            create_time: None,
            update_time: None,
        };

        let mini: Mini = d.deserialize_with_id().unwrap();
        assert_eq!(mini.id, "im-7");
        assert_eq!(mini.titulo, "Apto Jardins");
    }

    #[test]
    fn test_to_fields_descarta_id() {
        #[derive(serde::Serialize)]
        struct Mini {
            id: String,
            titulo: String,
        }

        let fields = to_fields(&Mini {
            id: "x".to_string(),
            titulo: "Casa".to_string(),
        })
        .unwrap();

        assert!(!fields.contains_key("id"));
        assert_eq!(fields["titulo"], json!("Casa"));
    }
}
