//! Registro de interações do corretor com um lead

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canal da interação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoInteracao {
    #[serde(rename = "WhatsApp")]
    WhatsApp,
    #[serde(rename = "Ligação")]
    Ligacao,
    #[serde(rename = "Email")]
    Email,
    #[serde(rename = "Visita ao Imóvel")]
    VisitaAoImovel,
    #[serde(rename = "Reunião")]
    Reuniao,
    #[serde(rename = "Outro")]
    Outro,
}

/// Interação persistida na coleção `interacoes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interacao {
    #[serde(default)]
    pub id: String,
    pub tipo: TipoInteracao,
    pub notas: String,
    pub cliente_id: String,
    pub cliente_nome: String,
    pub corretor_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payload de registro vindo do modal de interação
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaInteracao {
    pub tipo: TipoInteracao,
    pub notas: String,
    pub cliente_nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipo_serde_usa_nome_exibido() {
        assert_eq!(
            serde_json::to_string(&TipoInteracao::VisitaAoImovel).unwrap(),
            "\"Visita ao Imóvel\""
        );
        let de: TipoInteracao = serde_json::from_str("\"Ligação\"").unwrap();
        assert_eq!(de, TipoInteracao::Ligacao);
    }
}
