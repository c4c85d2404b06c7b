//! Favorito: marcação de um imóvel por um cliente
//!
//! Vive na subcoleção `clients/{uid}/favoritos` e carrega um snapshot dos
//! campos de exibição do imóvel, então a lista de favoritos (e os leads
//! derivados dela) continua renderizável mesmo que o imóvel suma depois.
//! `corretor_id` é denormalizado só para o filtro da query de collection
//! group do painel do corretor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorito {
    pub imovel_id: String,
    pub titulo: String,
    pub preco: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
    pub corretor_id: String,
    pub favoritado_em: DateTime<Utc>,
}

/// Favorito anotado com o cliente dono, extraído do caminho do documento
/// (`clients/{clienteId}/favoritos/{...}`) pela varredura de collection group
#[derive(Debug, Clone)]
pub struct FavoritoDeCliente {
    pub cliente_id: String,
    pub favorito: Favorito,
}
