//! Store de transações: pipeline de vendas/locações do corretor
//!
//! Todas as mutações são write-through no banco de documentos: a validação
//! acontece antes de qualquer escrita e uma escrita rejeitada não deixa
//! estado local para desfazer.

use crate::models::imovel::Imovel;
use crate::models::transacao::{DocumentoTransacao, NovaTransacao, StatusTransacao, Transacao};
use crate::models::TipoProcesso;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use chrono::Utc;
use firestore::{Direction, FirestoreClient, StructuredQuery};
use serde_json::{json, Map};

const COLECAO: &str = "transacoes";

#[derive(Clone)]
pub struct TransacaoService {
    store: FirestoreClient,
}

impl TransacaoService {
    pub fn new(store: FirestoreClient) -> Self {
        Self { store }
    }

    /// Cria uma transação a partir do modelo de processo escolhido
    ///
    /// Falha com `ModeloDesconhecido` se o tipo não está na tabela fixa e com
    /// `NaoEncontrado` se o imóvel não resolve entre os imóveis do corretor.
    /// Nos dois casos nada é escrito.
    pub async fn criar(&self, corretor_id: &str, payload: NovaTransacao) -> AppResult<Transacao> {
        if payload.nome_cliente.trim().is_empty() {
            return Err(AppError::ValidationError(
                "nome do cliente é obrigatório".to_string(),
            ));
        }

        let tipo: TipoProcesso = payload
            .tipo_processo
            .parse()
            .map_err(AppError::ModeloDesconhecido)?;

        // Snapshot do título; a leitura também garante que o imóvel pertence
        // ao corretor que está criando a transação
        let doc = self
            .store
            .get_document(&format!("imoveis/{}", payload.imovel_id))
            .await
            .map_err(|e| match e {
                firestore::FirestoreError::NotFound(_) => {
                    AppError::NaoEncontrado(format!("imóvel {}", payload.imovel_id))
                }
                other => other.into(),
            })?;
        let imovel: Imovel = doc.deserialize_with_id()?;
        if imovel.corretor_id != corretor_id {
            return Err(AppError::NaoEncontrado(format!(
                "imóvel {}",
                payload.imovel_id
            )));
        }

        let mut transacao = Transacao::nova(
            payload.nome_cliente,
            payload.imovel_id,
            imovel.titulo,
            tipo,
            corretor_id,
        );

        let fields = firestore::documents::to_fields(&transacao)?;
        let criado = self.store.create_document(COLECAO, None, &fields).await?;
        transacao.id = criado.id().to_string();

        log_transacao_criada(&transacao.id, &transacao.nome_cliente, tipo.nome());
        Ok(transacao)
    }

    /// Leitura pontual, restrita às transações do corretor
    pub async fn buscar(&self, corretor_id: &str, transacao_id: &str) -> AppResult<Transacao> {
        let doc = self
            .store
            .get_document(&format!("{}/{}", COLECAO, transacao_id))
            .await
            .map_err(|e| match e {
                firestore::FirestoreError::NotFound(_) => {
                    AppError::NaoEncontrado(format!("transação {}", transacao_id))
                }
                other => other.into(),
            })?;

        let transacao: Transacao = doc.deserialize_with_id()?;
        if transacao.corretor_id != corretor_id {
            // transação de outro corretor é indistinguível de inexistente
            return Err(AppError::NaoEncontrado(format!("transação {}", transacao_id)));
        }
        Ok(transacao)
    }

    /// Transações do corretor, mais recentes primeiro
    pub async fn listar(&self, corretor_id: &str) -> AppResult<Vec<Transacao>> {
        let query = StructuredQuery::collection(COLECAO)
            .filter_eq("corretorId", json!(corretor_id))
            .order_by("createdAt", Direction::Descending);

        let docs = self.store.run_query(&query).await?;
        let mut transacoes = Vec::with_capacity(docs.len());
        for doc in docs {
            transacoes.push(doc.deserialize_with_id::<Transacao>()?);
        }
        Ok(transacoes)
    }

    /// Move a transação para outro status do quadro
    ///
    /// Qualquer status pode ir para qualquer outro; o quadro não impõe
    /// transições. As etapas não são tocadas.
    pub async fn mover_status(
        &self,
        corretor_id: &str,
        transacao_id: &str,
        novo_status: StatusTransacao,
    ) -> AppResult<Transacao> {
        let mut transacao = self.buscar(corretor_id, transacao_id).await?;
        transacao.status = novo_status;

        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(novo_status));
        self.store
            .patch_document(&format!("{}/{}", COLECAO, transacao_id), &fields, &["status"])
            .await?;

        log_transacao_movida(transacao_id, novo_status.nome());
        Ok(transacao)
    }

    /// Alterna uma etapa do checklist entre pendente e concluído
    ///
    /// O array de etapas inteiro é regravado (last-write-wins); chamadas
    /// concorrentes sobre etapas diferentes não têm garantia de ordem.
    pub async fn alternar_etapa(
        &self,
        corretor_id: &str,
        transacao_id: &str,
        indice: usize,
    ) -> AppResult<Transacao> {
        let mut transacao = self.buscar(corretor_id, transacao_id).await?;

        if !transacao.alternar_etapa(indice) {
            return Err(AppError::NaoEncontrado(format!(
                "etapa {} da transação {}",
                indice, transacao_id
            )));
        }

        let mut fields = Map::new();
        fields.insert("etapas".to_string(), serde_json::to_value(&transacao.etapas)?);
        self.store
            .patch_document(&format!("{}/{}", COLECAO, transacao_id), &fields, &["etapas"])
            .await?;

        Ok(transacao)
    }

    /// Registra um documento já hospedado no host de mídia
    pub async fn anexar_documento(
        &self,
        corretor_id: &str,
        transacao_id: &str,
        nome_arquivo: String,
        url: String,
    ) -> AppResult<DocumentoTransacao> {
        self.buscar(corretor_id, transacao_id).await?;

        let mut documento = DocumentoTransacao {
            id: String::new(),
            nome_arquivo,
            url,
            enviado_por: "corretor".to_string(),
            created_at: Utc::now(),
        };

        let fields = firestore::documents::to_fields(&documento)?;
        let criado = self
            .store
            .create_document(
                &format!("{}/{}/documentos", COLECAO, transacao_id),
                None,
                &fields,
            )
            .await?;
        documento.id = criado.id().to_string();
        Ok(documento)
    }

    /// Documentos anexados, mais recentes primeiro
    pub async fn listar_documentos(
        &self,
        corretor_id: &str,
        transacao_id: &str,
    ) -> AppResult<Vec<DocumentoTransacao>> {
        self.buscar(corretor_id, transacao_id).await?;

        let query = StructuredQuery::collection("documentos")
            .order_by("createdAt", Direction::Descending);
        let docs = self
            .store
            .run_query_under(Some(&format!("{}/{}", COLECAO, transacao_id)), &query)
            .await?;

        let mut documentos = Vec::with_capacity(docs.len());
        for doc in docs {
            documentos.push(doc.deserialize_with_id::<DocumentoTransacao>()?);
        }
        Ok(documentos)
    }

    pub async fn apagar_documento(
        &self,
        corretor_id: &str,
        transacao_id: &str,
        documento_id: &str,
    ) -> AppResult<()> {
        self.buscar(corretor_id, transacao_id).await?;
        self.store
            .delete_document(&format!(
                "{}/{}/documentos/{}",
                COLECAO, transacao_id, documento_id
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn service(base_url: String) -> TransacaoService {
        TransacaoService::new(
            FirestoreClient::new("p-test").unwrap().with_base_url(base_url),
        )
    }

    fn imovel_doc() -> serde_json::Value {
        json!({
            "name": "projects/p-test/databases/(default)/documents/imoveis/im-1",
            "fields": {
                "titulo": { "stringValue": "Apto Jardins" },
                "tipo": { "stringValue": "apartamento" },
                "finalidade": { "stringValue": "venda" },
                "preco": { "doubleValue": 550000.0 },
                "status": { "stringValue": "disponivel" },
                "corretorId": { "stringValue": "uid-corretor" },
                "createdAt": { "stringValue": "2026-08-01T10:00:00Z" }
            }
        })
    }

    #[tokio::test]
    async fn test_criar_com_modelo_desconhecido_nao_escreve() {
        let server = MockServer::start();
        // nenhum mock registrado: qualquer chamada HTTP falharia o teste
        let service = service(server.base_url());

        let erro = service
            .criar(
                "uid-corretor",
                NovaTransacao {
                    nome_cliente: "Maria Silva".to_string(),
                    imovel_id: "im-1".to_string(),
                    tipo_processo: "Permuta de Imóveis".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::ModeloDesconhecido(_)));
    }

    #[tokio::test]
    async fn test_criar_snapshota_titulo_e_instancia_checklist() {
        let server = MockServer::start();
        let get_imovel = server.mock(|when, then| {
            when.method(GET)
                .path("/projects/p-test/databases/(default)/documents/imoveis/im-1");
            then.status(200).json_body(imovel_doc());
        });
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/projects/p-test/databases/(default)/documents/transacoes");
            then.status(200).json_body(json!({
                "name": "projects/p-test/databases/(default)/documents/transacoes/tx-1",
                "fields": {}
            }));
        });

        let service = service(server.base_url());
        let transacao = service
            .criar(
                "uid-corretor",
                NovaTransacao {
                    nome_cliente: "Venda Apto Jardins - Maria Silva".to_string(),
                    imovel_id: "im-1".to_string(),
                    tipo_processo: "Venda de Terreno".to_string(),
                },
            )
            .await
            .unwrap();

        get_imovel.assert();
        create.assert();
        assert_eq!(transacao.id, "tx-1");
        assert_eq!(transacao.imovel_titulo, "Apto Jardins");
        assert_eq!(transacao.status, StatusTransacao::Nova);
        assert_eq!(
            transacao.etapas.len(),
            TipoProcesso::VendaDeTerreno.nomes_das_etapas().len()
        );
    }

    #[tokio::test]
    async fn test_criar_com_imovel_de_outro_corretor_falha() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/projects/p-test/databases/(default)/documents/imoveis/im-1");
            then.status(200).json_body(imovel_doc());
        });

        let service = service(server.base_url());
        let erro = service
            .criar(
                "uid-outro",
                NovaTransacao {
                    nome_cliente: "Maria".to_string(),
                    imovel_id: "im-1".to_string(),
                    tipo_processo: "Venda de Terreno".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::NaoEncontrado(_)));
    }

    #[tokio::test]
    async fn test_mover_status_inexistente_da_nao_encontrado() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/projects/p-test/databases/(default)/documents/transacoes/tx-404");
            then.status(404).json_body(json!({
                "error": { "code": 404, "message": "Document not found", "status": "NOT_FOUND" }
            }));
        });

        let service = service(server.base_url());
        let erro = service
            .mover_status("uid-corretor", "tx-404", StatusTransacao::Cancelada)
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::NaoEncontrado(_)));
    }
}
