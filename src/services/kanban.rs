//! Projeção do quadro kanban
//!
//! Visão derivada e sem estado: recalculada a cada leitura a partir da lista
//! que o store devolve. O conjunto de um corretor fica nas poucas centenas,
//! então o recálculo completo é barato.

use crate::models::transacao::{StatusTransacao, Transacao};
use serde::Serialize;

/// As quatro colunas fixas do quadro, na ordem de exibição
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadroKanban {
    pub nova: Vec<Transacao>,
    pub em_andamento: Vec<Transacao>,
    pub concluida: Vec<Transacao>,
    pub cancelada: Vec<Transacao>,
}

impl QuadroKanban {
    pub fn total(&self) -> usize {
        self.nova.len() + self.em_andamento.len() + self.concluida.len() + self.cancelada.len()
    }
}

/// Particiona as transações nas quatro colunas, preservando a ordem de entrada
///
/// Partição total e disjunta: cada transação tem exatamente um status, então
/// aparece em exatamente uma coluna.
pub fn projetar_quadro(transacoes: Vec<Transacao>) -> QuadroKanban {
    let mut quadro = QuadroKanban::default();

    for transacao in transacoes {
        match transacao.status {
            StatusTransacao::Nova => quadro.nova.push(transacao),
            StatusTransacao::EmAndamento => quadro.em_andamento.push(transacao),
            StatusTransacao::Concluida => quadro.concluida.push(transacao),
            StatusTransacao::Cancelada => quadro.cancelada.push(transacao),
        }
    }

    quadro
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoProcesso;

    fn transacao(nome: &str, status: StatusTransacao) -> Transacao {
        let mut t = Transacao::nova(
            nome,
            "im-1",
            "Casa",
            TipoProcesso::VendaDeTerreno,
            "uid-corretor",
        );
        t.status = status;
        t
    }

    #[test]
    fn test_particao_total_e_disjunta() {
        let transacoes = vec![
            transacao("a", StatusTransacao::Nova),
            transacao("b", StatusTransacao::Concluida),
            transacao("c", StatusTransacao::EmAndamento),
            transacao("d", StatusTransacao::Cancelada),
            transacao("e", StatusTransacao::Nova),
        ];

        let quadro = projetar_quadro(transacoes);

        assert_eq!(quadro.total(), 5);
        assert_eq!(quadro.nova.len(), 2);
        assert_eq!(quadro.em_andamento.len(), 1);
        assert_eq!(quadro.concluida.len(), 1);
        assert_eq!(quadro.cancelada.len(), 1);
    }

    #[test]
    fn test_ordem_de_entrada_preservada() {
        let transacoes = vec![
            transacao("primeira", StatusTransacao::Nova),
            transacao("segunda", StatusTransacao::EmAndamento),
            transacao("terceira", StatusTransacao::Nova),
        ];

        let quadro = projetar_quadro(transacoes);
        let nomes: Vec<&str> = quadro.nova.iter().map(|t| t.nome_cliente.as_str()).collect();
        assert_eq!(nomes, vec!["primeira", "terceira"]);
    }

    #[test]
    fn test_quadro_vazio() {
        let quadro = projetar_quadro(Vec::new());
        assert_eq!(quadro.total(), 0);
    }

    #[test]
    fn test_mover_para_cancelada_e_voltar_nao_toca_etapas() {
        // O quadro aceita qualquer sequência de status; as etapas são
        // propriedade da transação e não mudam com o movimento
        let mut t = transacao("x", StatusTransacao::Nova);
        let etapas_originais = t.etapas.clone();

        t.status = StatusTransacao::Cancelada;
        let quadro = projetar_quadro(vec![t.clone()]);
        assert_eq!(quadro.cancelada.len(), 1);

        t.status = StatusTransacao::Nova;
        let quadro = projetar_quadro(vec![t.clone()]);
        assert_eq!(quadro.nova.len(), 1);
        assert_eq!(quadro.nova[0].etapas, etapas_originais);
    }
}
