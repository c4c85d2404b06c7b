//! Lead: projeção derivada (nunca persistida) dos favoritos de um cliente

use crate::models::cliente::PerfilCliente;
use crate::models::favorito::Favorito;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Um cliente que favoritou imóveis do corretor, com a lista de favoritos
/// ordenada do mais recente para o mais antigo
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub cliente: PerfilCliente,
    pub favoritos: Vec<Favorito>,
    /// Máximo de `favoritado_em` do grupo; chave da ordenação dos leads
    pub ultimo_favorito: DateTime<Utc>,
}

/// Resultado da agregação de leads
///
/// Um perfil de cliente que não resolve não derruba a agregação dos demais:
/// o grupo é omitido do resultado e o identificador vai para
/// `clientes_ignorados`, para a interface poder sinalizar o dado parcial.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgregacaoLeads {
    pub leads: Vec<Lead>,
    pub clientes_ignorados: Vec<String>,
}
