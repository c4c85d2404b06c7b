//! Transação: um processo de venda/locação com checklist e status de pipeline

use crate::models::checklist::{Etapa, TipoProcesso};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status da transação no quadro kanban
///
/// Exatamente um por transação. Qualquer status pode ser movido para
/// qualquer outro: o quadro não impõe uma tabela de transições.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTransacao {
    #[serde(rename = "Nova")]
    Nova,
    #[serde(rename = "Em Andamento")]
    EmAndamento,
    #[serde(rename = "Concluída")]
    Concluida,
    #[serde(rename = "Cancelada")]
    Cancelada,
}

impl StatusTransacao {
    /// Os quatro status, na ordem das colunas do quadro
    pub const TODOS: [StatusTransacao; 4] = [
        StatusTransacao::Nova,
        StatusTransacao::EmAndamento,
        StatusTransacao::Concluida,
        StatusTransacao::Cancelada,
    ];

    pub fn nome(&self) -> &'static str {
        match self {
            StatusTransacao::Nova => "Nova",
            StatusTransacao::EmAndamento => "Em Andamento",
            StatusTransacao::Concluida => "Concluída",
            StatusTransacao::Cancelada => "Cancelada",
        }
    }
}

impl FromStr for StatusTransacao {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusTransacao::TODOS
            .iter()
            .find(|st| st.nome() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for StatusTransacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nome())
    }
}

/// Transação persistida na coleção `transacoes`
///
/// `imovel_titulo` é um snapshot do título no momento da criação e não
/// acompanha edições posteriores do imóvel. `etapas` nasce do modelo do
/// processo e nunca muda de tamanho ou ordem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transacao {
    #[serde(default)]
    pub id: String,
    pub nome_cliente: String,
    pub imovel_id: String,
    pub imovel_titulo: String,
    pub tipo_processo: TipoProcesso,
    pub status: StatusTransacao,
    pub etapas: Vec<Etapa>,
    pub corretor_id: String,
    pub created_at: DateTime<Utc>,
}

impl Transacao {
    /// Monta uma transação nova a partir do modelo de processo
    pub fn nova(
        nome_cliente: impl Into<String>,
        imovel_id: impl Into<String>,
        imovel_titulo: impl Into<String>,
        tipo_processo: TipoProcesso,
        corretor_id: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            nome_cliente: nome_cliente.into(),
            imovel_id: imovel_id.into(),
            imovel_titulo: imovel_titulo.into(),
            tipo_processo,
            status: StatusTransacao::Nova,
            etapas: tipo_processo.etapas_iniciais(),
            corretor_id: corretor_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Alterna o estado da etapa `indice`; `false` se o índice não existe
    pub fn alternar_etapa(&mut self, indice: usize) -> bool {
        match self.etapas.get_mut(indice) {
            Some(etapa) => {
                etapa.status = etapa.status.alternado();
                true
            }
            None => false,
        }
    }

    /// Quantidade de etapas já concluídas
    pub fn etapas_concluidas(&self) -> usize {
        self.etapas
            .iter()
            .filter(|e| e.status == crate::models::checklist::EtapaStatus::Concluido)
            .count()
    }

    /// Progresso do checklist em percentual (0-100)
    pub fn progresso(&self) -> f64 {
        if self.etapas.is_empty() {
            return 0.0;
        }
        (self.etapas_concluidas() as f64 / self.etapas.len() as f64) * 100.0
    }
}

/// Payload de criação vindo do modal "Iniciar Nova Transação"
///
/// `tipo_processo` chega como texto e só vira [`TipoProcesso`] se estiver na
/// tabela fixa de modelos; nome desconhecido é erro de validação, nunca uma
/// transação sem etapas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaTransacao {
    pub nome_cliente: String,
    pub imovel_id: String,
    pub tipo_processo: String,
}

/// Documento anexado a uma transação (subcoleção `documentos`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoTransacao {
    #[serde(default)]
    pub id: String,
    pub nome_arquivo: String,
    pub url: String,
    pub enviado_por: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::checklist::EtapaStatus;

    #[test]
    fn test_nova_comeca_com_status_nova_e_etapas_pendentes() {
        let t = Transacao::nova(
            "Venda Apto Jardins - Maria Silva",
            "im-1",
            "Apto Jardins",
            TipoProcesso::VendaDeTerreno,
            "uid-corretor",
        );

        assert_eq!(t.status, StatusTransacao::Nova);
        assert_eq!(t.etapas.len(), 5);
        assert!(t.etapas.iter().all(|e| e.status == EtapaStatus::Pendente));
        assert_eq!(t.etapas_concluidas(), 0);
    }

    #[test]
    fn test_etapas_iguais_ao_modelo_estatico() {
        let t = Transacao::nova("c", "i", "t", TipoProcesso::VendaDeTerreno, "u");
        let nomes: Vec<&str> = t.etapas.iter().map(|e| e.nome.as_str()).collect();
        assert_eq!(nomes, TipoProcesso::VendaDeTerreno.nomes_das_etapas());
    }

    #[test]
    fn test_alternar_etapa_duas_vezes_volta_ao_original() {
        let mut t = Transacao::nova("c", "i", "t", TipoProcesso::LocacaoComFiador, "u");
        let antes = t.etapas.clone();

        assert!(t.alternar_etapa(2));
        assert_eq!(t.etapas[2].status, EtapaStatus::Concluido);
        // só a etapa alvo mudou
        for (i, etapa) in t.etapas.iter().enumerate() {
            if i != 2 {
                assert_eq!(*etapa, antes[i]);
            }
        }

        assert!(t.alternar_etapa(2));
        assert_eq!(t.etapas, antes);
    }

    #[test]
    fn test_alternar_etapa_indice_invalido() {
        let mut t = Transacao::nova("c", "i", "t", TipoProcesso::VendaDeTerreno, "u");
        assert!(!t.alternar_etapa(99));
    }

    #[test]
    fn test_progresso() {
        let mut t = Transacao::nova("c", "i", "t", TipoProcesso::VendaDeTerreno, "u");
        assert_eq!(t.progresso(), 0.0);
        t.alternar_etapa(0);
        assert_eq!(t.progresso(), 20.0);
    }

    #[test]
    fn test_status_serde_usa_nome_exibido() {
        assert_eq!(
            serde_json::to_string(&StatusTransacao::EmAndamento).unwrap(),
            "\"Em Andamento\""
        );
        let de: StatusTransacao = serde_json::from_str("\"Concluída\"").unwrap();
        assert_eq!(de, StatusTransacao::Concluida);
    }

    #[test]
    fn test_serde_camel_case() {
        let t = Transacao::nova("Maria", "im-9", "Casa", TipoProcesso::VendaDeTerreno, "uid");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["nomeCliente"], "Maria");
        assert_eq!(json["imovelTitulo"], "Casa");
        assert_eq!(json["tipoProcesso"], "Venda de Terreno");
        assert_eq!(json["status"], "Nova");
    }
}
