//! Queries estruturadas (`runQuery`) com filtros de igualdade, ordenação e limite

use crate::client::FirestoreClient;
use crate::documents::Document;
use crate::error::Result;
use crate::value;
use serde::Deserialize;
use serde_json::{json, Value};

/// Direção de ordenação
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        }
    }
}

/// Builder para o corpo de um `runQuery`
///
/// Só o subconjunto usado pela plataforma: seleção de coleção (com ou sem
/// `allDescendants`), filtros de igualdade combinados com AND, uma ordenação
/// e limite.
#[derive(Debug, Clone)]
pub struct StructuredQuery {
    collection_id: String,
    all_descendants: bool,
    eq_filters: Vec<(String, Value)>,
    order_by: Option<(String, Direction)>,
    limit: Option<u32>,
}

impl StructuredQuery {
    /// Query sobre uma coleção direta do pai
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            all_descendants: false,
            eq_filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Query de collection group: varre a coleção em qualquer nível da árvore
    pub fn collection_group(collection_id: impl Into<String>) -> Self {
        let mut query = Self::collection(collection_id);
        query.all_descendants = true;
        query
    }

    /// Adiciona um filtro de igualdade (múltiplos filtros viram um AND)
    pub fn filter_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.eq_filters.push((field.into(), value));
        self
    }

    /// Define a ordenação por um único campo
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    /// Limita o número de resultados
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Corpo JSON do `runQuery`
    pub fn body(&self) -> Value {
        let mut structured = json!({
            "from": [{
                "collectionId": self.collection_id,
                "allDescendants": self.all_descendants,
            }]
        });

        let filters: Vec<Value> = self
            .eq_filters
            .iter()
            .map(|(field, v)| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": value::to_firestore(v),
                    }
                })
            })
            .collect();

        match filters.len() {
            0 => {}
            1 => {
                structured["where"] = filters.into_iter().next().unwrap();
            }
            _ => {
                structured["where"] = json!({
                    "compositeFilter": { "op": "AND", "filters": filters }
                });
            }
        }

        if let Some((field, direction)) = &self.order_by {
            structured["orderBy"] = json!([{
                "field": { "fieldPath": field },
                "direction": direction.as_str(),
            }]);
        }

        if let Some(limit) = self.limit {
            structured["limit"] = json!(limit);
        }

        json!({ "structuredQuery": structured })
    }
}

/// Um elemento do stream de resposta do `runQuery`
///
/// A API devolve um array onde entradas sem `document` são só progresso de
/// leitura (`readTime`) e devem ser ignoradas.
#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

impl FirestoreClient {
    /// Executa a query na raiz de documentos
    pub async fn run_query(&self, query: &StructuredQuery) -> Result<Vec<Document>> {
        self.run_query_under(None, query).await
    }

    /// Executa a query sob um documento pai (`transacoes/{id}` para subcoleções)
    pub async fn run_query_under(
        &self,
        parent: Option<&str>,
        query: &StructuredQuery,
    ) -> Result<Vec<Document>> {
        let url = match parent {
            Some(path) => format!("{}/{}:runQuery", self.documents_root(), path),
            None => format!("{}:runQuery", self.documents_root()),
        };

        let response = self.post(&url, &query.body()).await?;
        let results: Vec<QueryResult> = response.json().await?;

        Ok(results.into_iter().filter_map(|r| r.document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_simples() {
        let query = StructuredQuery::collection("imoveis")
            .order_by("createdAt", Direction::Descending);
        let body = query.body();

        assert_eq!(body["structuredQuery"]["from"][0]["collectionId"], "imoveis");
        assert_eq!(body["structuredQuery"]["from"][0]["allDescendants"], false);
        assert_eq!(
            body["structuredQuery"]["orderBy"][0]["direction"],
            "DESCENDING"
        );
        assert!(body["structuredQuery"].get("where").is_none());
    }

    #[test]
    fn test_filtro_unico_sem_composite() {
        let query = StructuredQuery::collection("transacoes")
            .filter_eq("corretorId", json!("uid-1"));
        let body = query.body();

        let filtro = &body["structuredQuery"]["where"]["fieldFilter"];
        assert_eq!(filtro["field"]["fieldPath"], "corretorId");
        assert_eq!(filtro["op"], "EQUAL");
        assert_eq!(filtro["value"]["stringValue"], "uid-1");
    }

    #[test]
    fn test_filtros_multiplos_viram_and() {
        let query = StructuredQuery::collection("users")
            .filter_eq("role", json!("corretor"))
            .filter_eq("status", json!("ativo"))
            .limit(10);
        let body = query.body();

        let composite = &body["structuredQuery"]["where"]["compositeFilter"];
        assert_eq!(composite["op"], "AND");
        assert_eq!(composite["filters"].as_array().unwrap().len(), 2);
        assert_eq!(body["structuredQuery"]["limit"], 10);
    }

    #[test]
    fn test_collection_group() {
        let query = StructuredQuery::collection_group("favoritos")
            .filter_eq("corretorId", json!("uid-7"));
        let body = query.body();

        assert_eq!(body["structuredQuery"]["from"][0]["allDescendants"], true);
    }

    #[tokio::test]
    async fn test_run_query_contra_mock() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/projects/p-test/databases/(default)/documents:runQuery");
            then.status(200).json_body(json!([
                {
                    "document": {
                        "name": "projects/p-test/databases/(default)/documents/imoveis/im-1",
                        "fields": { "titulo": { "stringValue": "Casa" } }
                    },
                    "readTime": "2026-08-07T12:00:00Z"
                },
                { "readTime": "2026-08-07T12:00:00Z" }
            ]));
        });

        let client = crate::FirestoreClient::new("p-test")
            .unwrap()
            .with_base_url(server.base_url());

        let docs = client
            .run_query(&StructuredQuery::collection("imoveis"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id(), "im-1");
        assert_eq!(docs[0].to_json()["titulo"], "Casa");
    }
}
