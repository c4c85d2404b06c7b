//! Modelos de processo e checklist de etapas
//!
//! A tabela de modelos é fixa e compilada no binário: cada tipo de processo
//! tem uma lista ordenada de etapas que nunca muda depois que a transação é
//! criada (só o estado de cada etapa alterna entre pendente e concluído).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipos de processo disponíveis para uma transação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoProcesso {
    #[serde(rename = "Financiamento Caixa - MCMV")]
    FinanciamentoCaixaMcmv,
    #[serde(rename = "Venda de Terreno")]
    VendaDeTerreno,
    #[serde(rename = "Locação com Fiador")]
    LocacaoComFiador,
}

impl TipoProcesso {
    /// Todos os modelos, na ordem exibida ao corretor
    pub const TODOS: [TipoProcesso; 3] = [
        TipoProcesso::FinanciamentoCaixaMcmv,
        TipoProcesso::VendaDeTerreno,
        TipoProcesso::LocacaoComFiador,
    ];

    /// Nome do modelo como gravado no banco
    pub fn nome(&self) -> &'static str {
        match self {
            TipoProcesso::FinanciamentoCaixaMcmv => "Financiamento Caixa - MCMV",
            TipoProcesso::VendaDeTerreno => "Venda de Terreno",
            TipoProcesso::LocacaoComFiador => "Locação com Fiador",
        }
    }

    /// Nomes das etapas do modelo, na ordem do processo
    pub fn nomes_das_etapas(&self) -> &'static [&'static str] {
        match self {
            TipoProcesso::FinanciamentoCaixaMcmv => &[
                "Simulação de Financiamento",
                "Coleta de Documentos do Cliente",
                "Análise de Crédito na Caixa",
                "Avaliação do Imóvel",
                "Emissão do Contrato",
                "Assinatura e Registro",
            ],
            TipoProcesso::VendaDeTerreno => &[
                "Verificação de Matrícula",
                "Coleta de Documentos (Vendedor/Comprador)",
                "Elaboração do Contrato de Compra e Venda",
                "Assinatura do Contrato",
                "Escritura e Registro",
            ],
            TipoProcesso::LocacaoComFiador => &[
                "Coleta de Documentos (Locatário/Fiador)",
                "Análise Cadastral",
                "Elaboração do Contrato de Locação",
                "Vistoria do Imóvel",
                "Assinatura do Contrato",
            ],
        }
    }

    /// Instancia uma cópia nova das etapas, todas pendentes
    pub fn etapas_iniciais(&self) -> Vec<Etapa> {
        self.nomes_das_etapas()
            .iter()
            .map(|nome| Etapa {
                nome: nome.to_string(),
                status: EtapaStatus::Pendente,
            })
            .collect()
    }
}

impl FromStr for TipoProcesso {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipoProcesso::TODOS
            .iter()
            .find(|t| t.nome() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for TipoProcesso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nome())
    }
}

/// Estado de uma etapa do checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EtapaStatus {
    #[serde(rename = "pendente")]
    Pendente,
    #[serde(rename = "concluido")]
    Concluido,
}

impl EtapaStatus {
    /// Estado oposto (usado pelo toggle da etapa)
    pub fn alternado(&self) -> Self {
        match self {
            EtapaStatus::Pendente => EtapaStatus::Concluido,
            EtapaStatus::Concluido => EtapaStatus::Pendente,
        }
    }
}

/// Uma etapa do checklist de uma transação
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etapa {
    pub nome: String,
    pub status: EtapaStatus,
}
