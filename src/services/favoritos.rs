//! Favoritos do cliente final
//!
//! Cada favorito vive em `clients/{uid}/favoritos/{imovelId}` com um
//! snapshot dos campos de exibição. Criado ao favoritar, apagado ao
//! desfavoritar, nunca editado.

use crate::models::favorito::Favorito;
use crate::models::imovel::Imovel;
use crate::utils::{AppError, AppResult};
use chrono::Utc;
use firestore::{Direction, FirestoreClient, StructuredQuery};

#[derive(Clone)]
pub struct FavoritoService {
    store: FirestoreClient,
}

impl FavoritoService {
    pub fn new(store: FirestoreClient) -> Self {
        Self { store }
    }

    /// Marca um imóvel como favorito do cliente
    ///
    /// O id do documento é o id do imóvel, então favoritar duas vezes não
    /// duplica o registro.
    pub async fn marcar(&self, cliente_id: &str, imovel: &Imovel) -> AppResult<Favorito> {
        let favorito = Favorito {
            imovel_id: imovel.id.clone(),
            titulo: imovel.titulo.clone(),
            preco: imovel.preco,
            foto: imovel.fotos.first().cloned(),
            corretor_id: imovel.corretor_id.clone(),
            favoritado_em: Utc::now(),
        };

        let fields = firestore::documents::to_fields(&favorito)?;
        self.store
            .create_document(
                &format!("clients/{}/favoritos", cliente_id),
                Some(&imovel.id),
                &fields,
            )
            .await?;
        Ok(favorito)
    }

    /// Remove a marcação
    pub async fn desmarcar(&self, cliente_id: &str, imovel_id: &str) -> AppResult<()> {
        self.store
            .delete_document(&format!("clients/{}/favoritos/{}", cliente_id, imovel_id))
            .await
            .map_err(|e| match e {
                firestore::FirestoreError::NotFound(_) => {
                    AppError::NaoEncontrado(format!("favorito {}", imovel_id))
                }
                other => other.into(),
            })?;
        Ok(())
    }

    /// Favoritos do cliente, mais recentes primeiro
    pub async fn listar(&self, cliente_id: &str) -> AppResult<Vec<Favorito>> {
        let query = StructuredQuery::collection("favoritos")
            .order_by("favoritadoEm", Direction::Descending);

        let docs = self
            .store
            .run_query_under(Some(&format!("clients/{}", cliente_id)), &query)
            .await?;

        let mut favoritos = Vec::with_capacity(docs.len());
        for doc in docs {
            favoritos.push(doc.deserialize::<Favorito>()?);
        }
        Ok(favoritos)
    }
}
