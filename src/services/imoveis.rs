//! Catálogo de imóveis: vitrine pública e painel do corretor

use crate::models::corretor::Corretor;
use crate::models::imovel::{Imovel, NovoImovel};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use firestore::{Direction, FirestoreClient, StructuredQuery};
use serde_json::json;

const COLECAO: &str = "imoveis";

#[derive(Clone)]
pub struct ImovelService {
    store: FirestoreClient,
}

impl ImovelService {
    pub fn new(store: FirestoreClient) -> Self {
        Self { store }
    }

    /// Cadastra um imóvel para o corretor autenticado
    pub async fn criar(&self, corretor_id: &str, payload: NovoImovel) -> AppResult<Imovel> {
        payload.validar()?;

        let mut imovel = payload.em_imovel(corretor_id);
        let fields = firestore::documents::to_fields(&imovel)?;
        let criado = self.store.create_document(COLECAO, None, &fields).await?;
        imovel.id = criado.id().to_string();

        log_info(&format!("Imóvel cadastrado: {} - {}", imovel.id, imovel.titulo));
        Ok(imovel)
    }

    /// Edita um imóvel do corretor, regravando os campos do formulário
    pub async fn atualizar(
        &self,
        corretor_id: &str,
        imovel_id: &str,
        payload: NovoImovel,
    ) -> AppResult<Imovel> {
        payload.validar()?;

        let existente = self.buscar_do_corretor(corretor_id, imovel_id).await?;

        let mut imovel = payload.em_imovel(corretor_id);
        imovel.id = existente.id;
        imovel.status = existente.status;
        imovel.created_at = existente.created_at;

        let fields = firestore::documents::to_fields(&imovel)?;
        let mask: Vec<&str> = fields.keys().map(|k| k.as_str()).collect();
        self.store
            .patch_document(&format!("{}/{}", COLECAO, imovel_id), &fields, &mask)
            .await?;

        Ok(imovel)
    }

    /// Remove um imóvel do corretor
    pub async fn apagar(&self, corretor_id: &str, imovel_id: &str) -> AppResult<()> {
        self.buscar_do_corretor(corretor_id, imovel_id).await?;
        self.store
            .delete_document(&format!("{}/{}", COLECAO, imovel_id))
            .await?;
        log_info(&format!("Imóvel apagado: {}", imovel_id));
        Ok(())
    }

    /// Remoção administrativa, sem checagem de dono (painel do super-admin)
    pub async fn apagar_como_admin(&self, imovel_id: &str) -> AppResult<()> {
        self.store
            .delete_document(&format!("{}/{}", COLECAO, imovel_id))
            .await
            .map_err(|e| match e {
                firestore::FirestoreError::NotFound(_) => {
                    AppError::NaoEncontrado(format!("imóvel {}", imovel_id))
                }
                other => other.into(),
            })?;
        log_info(&format!("Imóvel apagado pelo super-admin: {}", imovel_id));
        Ok(())
    }

    /// Anexa a URL de uma foto já hospedada no host de mídia
    pub async fn adicionar_foto(
        &self,
        corretor_id: &str,
        imovel_id: &str,
        url: String,
    ) -> AppResult<Imovel> {
        let mut imovel = self.buscar_do_corretor(corretor_id, imovel_id).await?;
        imovel.fotos.push(url);

        let mut fields = serde_json::Map::new();
        fields.insert("fotos".to_string(), json!(imovel.fotos));
        self.store
            .patch_document(&format!("{}/{}", COLECAO, imovel_id), &fields, &["fotos"])
            .await?;
        Ok(imovel)
    }

    /// Vitrine pública: todos os imóveis, mais recentes primeiro
    pub async fn listar_publico(&self) -> AppResult<Vec<Imovel>> {
        let query =
            StructuredQuery::collection(COLECAO).order_by("createdAt", Direction::Descending);
        self.coletar(query).await
    }

    /// Imóveis de um corretor, mais recentes primeiro
    pub async fn listar_do_corretor(&self, corretor_id: &str) -> AppResult<Vec<Imovel>> {
        let query = StructuredQuery::collection(COLECAO)
            .filter_eq("corretorId", json!(corretor_id))
            .order_by("createdAt", Direction::Descending);
        self.coletar(query).await
    }

    /// Leitura pontual pública
    pub async fn buscar(&self, imovel_id: &str) -> AppResult<Imovel> {
        let doc = self
            .store
            .get_document(&format!("{}/{}", COLECAO, imovel_id))
            .await
            .map_err(|e| match e {
                firestore::FirestoreError::NotFound(_) => {
                    AppError::NaoEncontrado(format!("imóvel {}", imovel_id))
                }
                other => other.into(),
            })?;
        Ok(doc.deserialize_with_id()?)
    }

    /// Detalhe público com o corretor responsável anexado
    ///
    /// O corretor pode não resolver (conta apagada); o imóvel continua
    /// renderizável sem a barra de contato.
    pub async fn buscar_com_corretor(
        &self,
        imovel_id: &str,
    ) -> AppResult<(Imovel, Option<Corretor>)> {
        let imovel = self.buscar(imovel_id).await?;

        let corretor = match self
            .store
            .get_document(&format!("users/{}", imovel.corretor_id))
            .await
        {
            Ok(doc) => doc.deserialize::<Corretor>().ok(),
            Err(e) => {
                log_warning(&format!(
                    "corretor {} do imóvel {} não resolvido: {}",
                    imovel.corretor_id, imovel_id, e
                ));
                None
            }
        };

        Ok((imovel, corretor))
    }

    /// Leitura restrita ao dono
    async fn buscar_do_corretor(&self, corretor_id: &str, imovel_id: &str) -> AppResult<Imovel> {
        let imovel = self.buscar(imovel_id).await?;
        if imovel.corretor_id != corretor_id {
            return Err(AppError::NaoEncontrado(format!("imóvel {}", imovel_id)));
        }
        Ok(imovel)
    }

    async fn coletar(&self, query: StructuredQuery) -> AppResult<Vec<Imovel>> {
        let docs = self.store.run_query(&query).await?;
        let mut imoveis = Vec::with_capacity(docs.len());
        for doc in docs {
            imoveis.push(doc.deserialize_with_id::<Imovel>()?);
        }
        Ok(imoveis)
    }
}
