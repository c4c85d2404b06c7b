//! Cliente final: navega a vitrine, favorita imóveis e vira lead

use serde::{Deserialize, Serialize};

/// Perfil do cliente na coleção `clients`
///
/// Criado no primeiro login social; os campos vêm do provedor de identidade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfilCliente {
    // o uid também está no caminho do documento; perfis antigos podem não
    // ter o campo
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
}
