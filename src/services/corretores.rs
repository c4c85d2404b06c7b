//! Gestão de corretores (painel do super-admin) e perfis públicos

use crate::models::corretor::Corretor;
use crate::models::imovel::{Finalidade, Imovel};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use firestore::{Direction, FirestoreClient, StructuredQuery};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};

const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Payload de criação de corretor (formulário do super-admin)
#[derive(Debug, Clone, Deserialize)]
pub struct NovoCorretor {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

/// Estatísticas agregadas da plataforma
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estatisticas {
    pub total_corretores: usize,
    pub total_imoveis: usize,
    pub preco_medio_venda: f64,
}

#[derive(Clone)]
pub struct CorretorService {
    store: FirestoreClient,
    http: reqwest::Client,
    api_key: String,
    identity_base_url: String,
}

impl CorretorService {
    pub fn new(store: FirestoreClient, http: reqwest::Client, api_key: String) -> Self {
        Self {
            store,
            http,
            api_key,
            identity_base_url: IDENTITY_BASE_URL.to_string(),
        }
    }

    /// Substitui a URL do Identity Toolkit (testes)
    pub fn with_identity_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.identity_base_url = base_url.into();
        self
    }

    /// Cria o login no provedor de identidade e o perfil na coleção `users`
    pub async fn criar(&self, payload: NovoCorretor) -> AppResult<Corretor> {
        if payload.senha.len() < 6 {
            return Err(AppError::ValidationError(
                "a senha precisa ter no mínimo 6 caracteres".to_string(),
            ));
        }
        if payload.nome.trim().is_empty() {
            return Err(AppError::ValidationError("nome é obrigatório".to_string()));
        }

        let uid = self.sign_up(&payload.email, &payload.senha).await?;

        let corretor = Corretor::novo(uid.clone(), payload.nome, payload.email);
        let fields = firestore::documents::to_fields(&corretor)?;
        self.store.create_document("users", Some(&uid), &fields).await?;

        log_info(&format!("Corretor criado: {} - {}", corretor.uid, corretor.nome));
        Ok(corretor)
    }

    /// Corretores da plataforma, ordenados por nome
    pub async fn listar(&self) -> AppResult<Vec<Corretor>> {
        let query = StructuredQuery::collection("users")
            .filter_eq("role", json!("corretor"))
            .order_by("nome", Direction::Ascending);

        let docs = self.store.run_query(&query).await?;
        let mut corretores = Vec::with_capacity(docs.len());
        for doc in docs {
            corretores.push(doc.deserialize::<Corretor>()?);
        }
        Ok(corretores)
    }

    /// Perfil público de um corretor (página da vitrine)
    pub async fn buscar(&self, corretor_id: &str) -> AppResult<Corretor> {
        let doc = self
            .store
            .get_document(&format!("users/{}", corretor_id))
            .await
            .map_err(|e| match e {
                firestore::FirestoreError::NotFound(_) => {
                    AppError::NaoEncontrado(format!("corretor {}", corretor_id))
                }
                other => other.into(),
            })?;
        Ok(doc.deserialize()?)
    }

    /// Atualiza o nome do corretor (o email é a chave do login e não muda)
    pub async fn atualizar_nome(&self, corretor_id: &str, nome: String) -> AppResult<Corretor> {
        let mut corretor = self.buscar(corretor_id).await?;
        corretor.nome = nome;

        let mut fields = Map::new();
        fields.insert("nome".to_string(), json!(corretor.nome));
        self.store
            .patch_document(&format!("users/{}", corretor_id), &fields, &["nome"])
            .await?;
        Ok(corretor)
    }

    /// Alterna o corretor entre ativo e inativo
    pub async fn alternar_status(&self, corretor_id: &str) -> AppResult<Corretor> {
        let mut corretor = self.buscar(corretor_id).await?;
        corretor.status = corretor.status.alternado();

        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(corretor.status));
        self.store
            .patch_document(&format!("users/{}", corretor_id), &fields, &["status"])
            .await?;

        log_info(&format!(
            "Corretor {} agora está {:?}",
            corretor_id, corretor.status
        ));
        Ok(corretor)
    }

    /// Apaga o perfil do corretor (os imóveis dele permanecem no catálogo)
    pub async fn apagar(&self, corretor_id: &str) -> AppResult<()> {
        self.buscar(corretor_id).await?;
        self.store
            .delete_document(&format!("users/{}", corretor_id))
            .await?;
        log_info(&format!("Corretor apagado: {}", corretor_id));
        Ok(())
    }

    /// Estatísticas do painel do super-admin
    pub async fn estatisticas(&self, imoveis: &[Imovel]) -> AppResult<Estatisticas> {
        let corretores = self.listar().await?;
        Ok(calcular_estatisticas(&corretores, imoveis))
    }

    /// Cria a conta no provedor de identidade e devolve o uid
    async fn sign_up(&self, email: &str, senha: &str) -> AppResult<String> {
        let url = format!(
            "{}/accounts:signUp?key={}",
            self.identity_base_url, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "email": email,
                "password": senha,
                "returnSecureToken": false,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log_error(&format!("Identity signUp falhou ({}): {}", status, error_text));

            if error_text.contains("EMAIL_EXISTS") {
                return Err(AppError::ValidationError(
                    "este email já está sendo utilizado".to_string(),
                ));
            }
            return Err(AppError::EscritaRemota(format!(
                "provedor de identidade recusou o cadastro: {}",
                status
            )));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("localId")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::EscritaRemota("resposta do signUp sem localId".to_string())
            })
    }
}

/// Estatísticas calculadas sobre as listas já carregadas
///
/// O preço médio considera só imóveis à venda com preço positivo, como o
/// painel sempre exibiu.
pub fn calcular_estatisticas(corretores: &[Corretor], imoveis: &[Imovel]) -> Estatisticas {
    let precos_venda: Vec<f64> = imoveis
        .iter()
        .filter(|i| i.finalidade == Finalidade::Venda && i.preco > 0.0)
        .map(|i| i.preco)
        .collect();

    let preco_medio_venda = if precos_venda.is_empty() {
        0.0
    } else {
        precos_venda.iter().sum::<f64>() / precos_venda.len() as f64
    };

    Estatisticas {
        total_corretores: corretores.len(),
        total_imoveis: imoveis.len(),
        preco_medio_venda,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::corretor::StatusCorretor;
    use crate::models::imovel::{NovoImovel, TipoImovel};

    fn imovel(finalidade: Finalidade, preco: f64) -> Imovel {
        NovoImovel {
            titulo: "Imóvel".to_string(),
            descricao: String::new(),
            tipo: TipoImovel::Casa,
            finalidade,
            preco,
            endereco: Default::default(),
            caracteristicas: Default::default(),
            comodidades: vec![],
            fotos: vec![],
            video_url: None,
        }
        .em_imovel("uid-1")
    }

    #[test]
    fn test_preco_medio_so_considera_vendas_com_preco() {
        let corretores = vec![Corretor::novo("u1", "Ana", "ana@imob.com")];
        let imoveis = vec![
            imovel(Finalidade::Venda, 100000.0),
            imovel(Finalidade::Venda, 300000.0),
            imovel(Finalidade::Aluguel, 2500.0),
            imovel(Finalidade::Venda, 0.0),
        ];

        let stats = calcular_estatisticas(&corretores, &imoveis);
        assert_eq!(stats.total_corretores, 1);
        assert_eq!(stats.total_imoveis, 4);
        assert_eq!(stats.preco_medio_venda, 200000.0);
    }

    #[test]
    fn test_sem_vendas_preco_medio_zero() {
        let stats = calcular_estatisticas(&[], &[imovel(Finalidade::Aluguel, 1500.0)]);
        assert_eq!(stats.preco_medio_venda, 0.0);
    }

    #[tokio::test]
    async fn test_criar_rejeita_senha_curta_sem_chamar_identidade() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let service = CorretorService::new(
            FirestoreClient::new("p-test").unwrap().with_base_url(server.base_url()),
            reqwest::Client::new(),
            "key".to_string(),
        )
        .with_identity_base_url(server.base_url());

        let erro = service
            .criar(NovoCorretor {
                nome: "Ana".to_string(),
                email: "ana@imob.com".to_string(),
                senha: "12345".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(erro, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_criar_faz_signup_e_grava_perfil() {
        use httpmock::prelude::*;

        let server = MockServer::start();
        let sign_up = server.mock(|when, then| {
            when.method(POST).path("/accounts:signUp");
            then.status(200).json_body(json!({ "localId": "uid-novo" }));
        });
        let create_doc = server.mock(|when, then| {
            when.method(POST)
                .path("/projects/p-test/databases/(default)/documents/users")
                .query_param("documentId", "uid-novo");
            then.status(200).json_body(json!({
                "name": "projects/p-test/databases/(default)/documents/users/uid-novo",
                "fields": {}
            }));
        });

        let service = CorretorService::new(
            FirestoreClient::new("p-test").unwrap().with_base_url(server.base_url()),
            reqwest::Client::new(),
            "key".to_string(),
        )
        .with_identity_base_url(server.base_url());

        let corretor = service
            .criar(NovoCorretor {
                nome: "Ana".to_string(),
                email: "ana@imob.com".to_string(),
                senha: "123456".to_string(),
            })
            .await
            .unwrap();

        sign_up.assert();
        create_doc.assert();
        assert_eq!(corretor.uid, "uid-novo");
        assert_eq!(corretor.status, StatusCorretor::Ativo);
    }
}
