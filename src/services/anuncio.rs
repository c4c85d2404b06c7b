//! Co-piloto de anúncios: descrição de marketing gerada pelo Gemini
//!
//! Totalmente desacoplado do pipeline de transações; se a chave da API não
//! está configurada o serviço simplesmente não existe no estado da aplicação.

use crate::models::imovel::{Finalidade, Imovel, TipoImovel};
use crate::utils::formatar_preco_brl;
use crate::utils::logging::*;
use crate::utils::AppResult;
use gemini::GeminiClient;

#[derive(Clone)]
pub struct AnuncioService {
    gemini: GeminiClient,
}

impl AnuncioService {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// Gera a descrição do anúncio a partir dos dados do imóvel
    pub async fn gerar_descricao(&self, imovel: &Imovel) -> AppResult<String> {
        let prompt = montar_prompt(imovel);
        log_info(&format!(
            "Gerando descrição de anúncio para o imóvel {} ({})",
            imovel.id,
            self.gemini.model()
        ));

        let texto = self.gemini.generate_content(&prompt).await?;
        Ok(texto)
    }
}

/// Prompt de marketing montado com os campos do imóvel
fn montar_prompt(imovel: &Imovel) -> String {
    let tipo = match imovel.tipo {
        TipoImovel::Casa => "casa",
        TipoImovel::Apartamento => "apartamento",
        TipoImovel::Terreno => "terreno",
    };
    let finalidade = match imovel.finalidade {
        Finalidade::Venda => "venda",
        Finalidade::Aluguel => "aluguel",
    };

    format!(
        r#"Aja como um corretor de imóveis especialista em marketing digital.
Sua tarefa é criar uma descrição de anúncio de imóvel que seja profissional, atraente e otimizada para vendas.

**Instruções:**
- Use um tom vendedor e convidativo.
- Destaque os principais benefícios e o estilo de vida que o imóvel proporciona.
- Organize o texto em parágrafos curtos e fáceis de ler.
- Inicie com um título chamativo.
- Finalize com uma chamada para ação (call to action), convidando o leitor a agendar uma visita.
- **NÃO** inclua informações de contato como telefone ou email.

**Dados do Imóvel:**
- Título: {titulo}
- Tipo: {tipo}
- Finalidade: {finalidade}
- Preço: {preco}
- Endereço: {bairro}, {cidade}
- Características Principais: {quartos} quartos, {suites} suítes, {banheiros} banheiros, {vagas} vagas de garagem.
- Área Total: {area} m².
- Descrição do Corretor: {descricao}

Agora, gere a descrição do anúncio."#,
        titulo = imovel.titulo,
        tipo = tipo,
        finalidade = finalidade,
        preco = formatar_preco_brl(imovel.preco),
        bairro = imovel.endereco.bairro,
        cidade = imovel.endereco.cidade,
        quartos = imovel.caracteristicas.quartos,
        suites = imovel.caracteristicas.suites,
        banheiros = imovel.caracteristicas.banheiros,
        vagas = imovel.caracteristicas.vagas_garagem,
        area = imovel.caracteristicas.area_total,
        descricao = imovel.descricao,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::imovel::{Caracteristicas, Endereco, NovoImovel};

    fn imovel() -> Imovel {
        NovoImovel {
            titulo: "Casa no Setor Bueno".to_string(),
            descricao: "Reformada em 2024".to_string(),
            tipo: TipoImovel::Casa,
            finalidade: Finalidade::Venda,
            preco: 480000.0,
            endereco: Endereco {
                bairro: "Setor Bueno".to_string(),
                cidade: "Goiânia".to_string(),
                ..Default::default()
            },
            caracteristicas: Caracteristicas {
                quartos: 3,
                suites: 1,
                banheiros: 2,
                vagas_garagem: 2,
                area_total: 180.0,
            },
            comodidades: vec![],
            fotos: vec![],
            video_url: None,
        }
        .em_imovel("uid-1")
    }

    #[test]
    fn test_prompt_inclui_dados_do_imovel() {
        let prompt = montar_prompt(&imovel());

        assert!(prompt.contains("Título: Casa no Setor Bueno"));
        assert!(prompt.contains("Preço: R$ 480.000"));
        assert!(prompt.contains("Endereço: Setor Bueno, Goiânia"));
        assert!(prompt.contains("3 quartos, 1 suítes, 2 banheiros, 2 vagas"));
        assert!(prompt.contains("Descrição do Corretor: Reformada em 2024"));
    }

    #[test]
    fn test_prompt_proibe_contato() {
        let prompt = montar_prompt(&imovel());
        assert!(prompt.contains("**NÃO** inclua informações de contato"));
    }
}
