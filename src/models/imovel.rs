//! Imóvel: a unidade do catálogo de cada corretor

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

static CEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoImovel {
    Casa,
    Apartamento,
    Terreno,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finalidade {
    Venda,
    Aluguel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusImovel {
    Disponivel,
    Vendido,
    Alugado,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endereco {
    #[serde(default)]
    pub rua: String,
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub cep: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caracteristicas {
    #[serde(default)]
    pub quartos: u32,
    #[serde(default)]
    pub suites: u32,
    #[serde(default)]
    pub banheiros: u32,
    #[serde(default)]
    pub vagas_garagem: u32,
    #[serde(default)]
    pub area_total: f64,
}

/// Imóvel persistido na coleção `imoveis`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imovel {
    #[serde(default)]
    pub id: String,
    pub titulo: String,
    #[serde(default)]
    pub descricao: String,
    pub tipo: TipoImovel,
    pub finalidade: Finalidade,
    pub preco: f64,
    pub status: StatusImovel,
    #[serde(default)]
    pub endereco: Endereco,
    #[serde(default)]
    pub caracteristicas: Caracteristicas,
    #[serde(default)]
    pub comodidades: Vec<String>,
    #[serde(default)]
    pub fotos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub corretor_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payload de cadastro/edição vindo do formulário
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoImovel {
    pub titulo: String,
    #[serde(default)]
    pub descricao: String,
    pub tipo: TipoImovel,
    pub finalidade: Finalidade,
    pub preco: f64,
    #[serde(default)]
    pub endereco: Endereco,
    #[serde(default)]
    pub caracteristicas: Caracteristicas,
    #[serde(default)]
    pub comodidades: Vec<String>,
    #[serde(default)]
    pub fotos: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl NovoImovel {
    /// Valida o payload antes de qualquer escrita remota
    pub fn validar(&self) -> AppResult<()> {
        if self.titulo.trim().is_empty() {
            return Err(AppError::ValidationError("título é obrigatório".to_string()));
        }
        if self.preco < 0.0 {
            return Err(AppError::ValidationError("preço não pode ser negativo".to_string()));
        }
        if !self.endereco.cep.is_empty() && !CEP_RE.is_match(&self.endereco.cep) {
            return Err(AppError::ValidationError(format!(
                "CEP inválido: {}",
                self.endereco.cep
            )));
        }
        Ok(())
    }

    /// Materializa o imóvel com dono e timestamp de criação
    pub fn em_imovel(self, corretor_id: impl Into<String>) -> Imovel {
        Imovel {
            id: String::new(),
            titulo: self.titulo,
            descricao: self.descricao,
            tipo: self.tipo,
            finalidade: self.finalidade,
            preco: self.preco,
            status: StatusImovel::Disponivel,
            endereco: self.endereco,
            caracteristicas: self.caracteristicas,
            comodidades: self.comodidades,
            fotos: self.fotos,
            video_url: self.video_url,
            corretor_id: corretor_id.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn novo_valido() -> NovoImovel {
        NovoImovel {
            titulo: "Casa no Setor Bueno".to_string(),
            descricao: String::new(),
            tipo: TipoImovel::Casa,
            finalidade: Finalidade::Venda,
            preco: 480000.0,
            endereco: Endereco {
                cidade: "Goiânia".to_string(),
                cep: "74230-010".to_string(),
                ..Default::default()
            },
            caracteristicas: Caracteristicas::default(),
            comodidades: vec![],
            fotos: vec![],
            video_url: None,
        }
    }

    #[test]
    fn test_validacao_aceita_payload_completo() {
        assert!(novo_valido().validar().is_ok());
    }

    #[test]
    fn test_titulo_vazio_rejeitado() {
        let mut novo = novo_valido();
        novo.titulo = "   ".to_string();
        assert!(novo.validar().is_err());
    }

    #[test]
    fn test_cep_sem_hifen_aceito() {
        let mut novo = novo_valido();
        novo.endereco.cep = "74230010".to_string();
        assert!(novo.validar().is_ok());
    }

    #[test]
    fn test_cep_malformado_rejeitado() {
        let mut novo = novo_valido();
        novo.endereco.cep = "742-30".to_string();
        assert!(novo.validar().is_err());
    }

    #[test]
    fn test_em_imovel_define_dono_e_status() {
        let imovel = novo_valido().em_imovel("uid-1");
        assert_eq!(imovel.corretor_id, "uid-1");
        assert_eq!(imovel.status, StatusImovel::Disponivel);
    }

    #[test]
    fn test_serde_camel_case() {
        let imovel = novo_valido().em_imovel("uid-1");
        let json = serde_json::to_value(&imovel).unwrap();
        assert_eq!(json["corretorId"], "uid-1");
        assert_eq!(json["tipo"], "casa");
        assert_eq!(json["finalidade"], "venda");
        assert!(json.get("videoUrl").is_none());
    }
}
