//! Agregador de leads
//!
//! Um lead não é persistido: é a projeção, em tempo de leitura, dos
//! favoritos de todos os clientes sobre os imóveis do corretor. A varredura
//! usa a query de collection group sobre `favoritos` filtrada pelo
//! `corretorId` denormalizado; o dono de cada favorito vem do caminho do
//! documento (`clients/{id}/favoritos/...`), não dos campos.

use crate::models::cliente::PerfilCliente;
use crate::models::favorito::{Favorito, FavoritoDeCliente};
use crate::models::interacao::{Interacao, NovaInteracao};
use crate::models::lead::{AgregacaoLeads, Lead};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use chrono::Utc;
use firestore::{Direction, FirestoreClient, StructuredQuery};
use serde_json::json;
use std::collections::HashMap;

#[derive(Clone)]
pub struct LeadService {
    store: FirestoreClient,
}

impl LeadService {
    pub fn new(store: FirestoreClient) -> Self {
        Self { store }
    }

    /// Leads do corretor: favoritos agrupados por cliente, com perfil anexado
    pub async fn listar(&self, corretor_id: &str) -> AppResult<AgregacaoLeads> {
        let query = StructuredQuery::collection_group("favoritos")
            .filter_eq("corretorId", json!(corretor_id));
        let docs = self.store.run_query(&query).await?;

        let mut favoritos = Vec::with_capacity(docs.len());
        for doc in docs {
            let Some(cliente_id) = doc.owner_id("clients").map(|s| s.to_string()) else {
                // favorito fora da árvore clients/: ignorado, nunca aborta
                log_warning(&format!("favorito fora de clients/: {}", doc.name));
                continue;
            };
            favoritos.push(FavoritoDeCliente {
                cliente_id,
                favorito: doc.deserialize::<Favorito>()?,
            });
        }

        // Um lookup por cliente distinto; perfil que não resolve só exclui o grupo
        let mut perfis: HashMap<String, PerfilCliente> = HashMap::new();
        for cliente_id in favoritos.iter().map(|f| f.cliente_id.clone()) {
            if perfis.contains_key(&cliente_id) {
                continue;
            }
            match self.store.get_document(&format!("clients/{}", cliente_id)).await {
                Ok(doc) => match doc.deserialize::<PerfilCliente>() {
                    Ok(mut perfil) => {
                        perfil.uid = cliente_id.clone();
                        perfis.insert(cliente_id, perfil);
                    }
                    Err(e) => log_warning(&format!(
                        "perfil do cliente {} ilegível: {}",
                        cliente_id, e
                    )),
                },
                Err(e) => log_warning(&format!(
                    "perfil do cliente {} não resolvido: {}",
                    cliente_id, e
                )),
            }
        }

        Ok(agrupar_leads(favoritos, &perfis))
    }

    /// Registra uma interação do corretor com um lead
    pub async fn registrar_interacao(
        &self,
        corretor_id: &str,
        cliente_id: &str,
        payload: NovaInteracao,
    ) -> AppResult<Interacao> {
        if payload.notas.trim().is_empty() {
            return Err(AppError::ValidationError(
                "adicione uma nota sobre a interação".to_string(),
            ));
        }

        let mut interacao = Interacao {
            id: String::new(),
            tipo: payload.tipo,
            notas: payload.notas,
            cliente_id: cliente_id.to_string(),
            cliente_nome: payload.cliente_nome,
            corretor_id: corretor_id.to_string(),
            created_at: Utc::now(),
        };

        let fields = firestore::documents::to_fields(&interacao)?;
        let criado = self.store.create_document("interacoes", None, &fields).await?;
        interacao.id = criado.id().to_string();
        Ok(interacao)
    }

    /// Interações com um cliente, mais recentes primeiro
    pub async fn listar_interacoes(
        &self,
        corretor_id: &str,
        cliente_id: &str,
    ) -> AppResult<Vec<Interacao>> {
        let query = StructuredQuery::collection("interacoes")
            .filter_eq("corretorId", json!(corretor_id))
            .filter_eq("clienteId", json!(cliente_id))
            .order_by("createdAt", Direction::Descending);

        let docs = self.store.run_query(&query).await?;
        let mut interacoes = Vec::with_capacity(docs.len());
        for doc in docs {
            interacoes.push(doc.deserialize_with_id::<Interacao>()?);
        }
        Ok(interacoes)
    }
}

/// Agrupa favoritos por cliente e ordena os grupos
///
/// - dentro do grupo: favoritos do mais recente para o mais antigo;
/// - entre grupos: pelo favorito mais recente de cada grupo, descendente
///   (quem favoritou por último aparece primeiro, não quem tem mais
///   favoritos); empate mantém a ordem de chegada (sort estável);
/// - cliente sem perfil resolvido sai de `leads` e entra em
///   `clientes_ignorados`.
pub fn agrupar_leads(
    favoritos: Vec<FavoritoDeCliente>,
    perfis: &HashMap<String, PerfilCliente>,
) -> AgregacaoLeads {
    // agrupamento preservando a ordem de chegada dos clientes
    let mut ordem: Vec<String> = Vec::new();
    let mut grupos: HashMap<String, Vec<Favorito>> = HashMap::new();

    for item in favoritos {
        if !grupos.contains_key(&item.cliente_id) {
            ordem.push(item.cliente_id.clone());
        }
        grupos.entry(item.cliente_id).or_default().push(item.favorito);
    }

    let mut leads = Vec::new();
    let mut clientes_ignorados = Vec::new();

    for cliente_id in ordem {
        let mut favoritos = grupos.remove(&cliente_id).unwrap_or_default();

        let Some(perfil) = perfis.get(&cliente_id) else {
            clientes_ignorados.push(cliente_id);
            continue;
        };

        favoritos.sort_by(|a, b| b.favoritado_em.cmp(&a.favoritado_em));
        // depois da ordenação descendente, o primeiro é o máximo do grupo
        let ultimo_favorito = match favoritos.first() {
            Some(f) => f.favoritado_em,
            None => continue,
        };

        leads.push(Lead {
            cliente: perfil.clone(),
            favoritos,
            ultimo_favorito,
        });
    }

    leads.sort_by(|a, b| b.ultimo_favorito.cmp(&a.ultimo_favorito));

    AgregacaoLeads {
        leads,
        clientes_ignorados,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn em(t: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(t, 0).unwrap()
    }

    fn favorito(cliente: &str, imovel: &str, t: i64) -> FavoritoDeCliente {
        FavoritoDeCliente {
            cliente_id: cliente.to_string(),
            favorito: Favorito {
                imovel_id: imovel.to_string(),
                titulo: format!("Imóvel {}", imovel),
                preco: 100000.0,
                foto: None,
                corretor_id: "uid-corretor".to_string(),
                favoritado_em: em(t),
            },
        }
    }

    fn perfil(uid: &str) -> (String, PerfilCliente) {
        (
            uid.to_string(),
            PerfilCliente {
                uid: uid.to_string(),
                nome: format!("Cliente {}", uid),
                email: format!("{}@mail.com", uid),
                foto: None,
            },
        )
    }

    #[test]
    fn test_agrupamento_ordena_pelo_favorito_mais_recente() {
        // A(t=10), A(t=30), B(t=20) => [A, B]: o máximo de A (30) ganha do de B (20)
        let favoritos = vec![
            favorito("A", "im-1", 10),
            favorito("A", "im-2", 30),
            favorito("B", "im-3", 20),
        ];
        let perfis: HashMap<_, _> = [perfil("A"), perfil("B")].into_iter().collect();

        let resultado = agrupar_leads(favoritos, &perfis);

        assert_eq!(resultado.leads.len(), 2);
        assert_eq!(resultado.leads[0].cliente.uid, "A");
        assert_eq!(resultado.leads[1].cliente.uid, "B");
        assert!(resultado.clientes_ignorados.is_empty());

        // dentro do grupo: mais recente primeiro
        let tempos: Vec<_> = resultado.leads[0]
            .favoritos
            .iter()
            .map(|f| f.favoritado_em)
            .collect();
        assert_eq!(tempos, vec![em(30), em(10)]);
        assert_eq!(resultado.leads[0].ultimo_favorito, em(30));
    }

    #[test]
    fn test_mais_favoritos_nao_ganha_de_mais_recente() {
        let favoritos = vec![
            favorito("A", "im-1", 1),
            favorito("A", "im-2", 2),
            favorito("A", "im-3", 3),
            favorito("B", "im-4", 50),
        ];
        let perfis: HashMap<_, _> = [perfil("A"), perfil("B")].into_iter().collect();

        let resultado = agrupar_leads(favoritos, &perfis);
        assert_eq!(resultado.leads[0].cliente.uid, "B");
    }

    #[test]
    fn test_perfil_nao_resolvido_e_omitido_sem_abortar() {
        let favoritos = vec![
            favorito("A", "im-1", 10),
            favorito("fantasma", "im-2", 99),
            favorito("B", "im-3", 20),
        ];
        let perfis: HashMap<_, _> = [perfil("A"), perfil("B")].into_iter().collect();

        let resultado = agrupar_leads(favoritos, &perfis);

        assert_eq!(resultado.leads.len(), 2);
        assert_eq!(resultado.clientes_ignorados, vec!["fantasma".to_string()]);
    }

    #[test]
    fn test_empate_mantem_ordem_de_chegada() {
        let favoritos = vec![
            favorito("A", "im-1", 10),
            favorito("B", "im-2", 10),
        ];
        let perfis: HashMap<_, _> = [perfil("A"), perfil("B")].into_iter().collect();

        let resultado = agrupar_leads(favoritos, &perfis);
        assert_eq!(resultado.leads[0].cliente.uid, "A");
        assert_eq!(resultado.leads[1].cliente.uid, "B");
    }

    #[test]
    fn test_sem_favoritos_sem_leads() {
        let resultado = agrupar_leads(Vec::new(), &HashMap::new());
        assert!(resultado.leads.is_empty());
        assert!(resultado.clientes_ignorados.is_empty());
    }
}
