//! Autenticação e papéis
//!
//! A verificação do token é delegada ao provedor de identidade
//! (`accounts:lookup`); a plataforma não valida JWT localmente. O papel vem
//! do perfil: `users/{uid}` para corretor/super-admin, `clients/{uid}` para
//! cliente final. Os três papéis são disjuntos e cada grupo de rotas aceita
//! exatamente um deles. A identidade resolvida segue para o handler via
//! request extensions; nenhum serviço lê estado global de autenticação.

use crate::models::cliente::PerfilCliente;
use crate::models::corretor::Corretor;
use crate::utils::{AppError, AppResult};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;

const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Papel do usuário autenticado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Papel {
    Corretor,
    SuperAdmin,
    Cliente,
}

/// Identidade resolvida, injetada nas rotas autenticadas
#[derive(Debug, Clone)]
pub struct Identidade {
    pub uid: String,
    pub nome: String,
    pub email: String,
    pub papel: Papel,
}

/// Middleware das rotas do painel do corretor
pub async fn exigir_corretor(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    exigir_papel(state, request, next, Papel::Corretor).await
}

/// Middleware das rotas do super-admin
pub async fn exigir_superadmin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    exigir_papel(state, request, next, Papel::SuperAdmin).await
}

/// Middleware das rotas do cliente final (favoritos)
pub async fn exigir_cliente(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    exigir_papel(state, request, next, Papel::Cliente).await
}

async fn exigir_papel(
    state: Arc<AppState>,
    mut request: Request,
    next: Next,
    papel: Papel,
) -> Result<Response, Response> {
    let identidade = resolver_identidade(&state, request.headers())
        .await
        .map_err(|e| e.into_response())?;

    if identidade.papel != papel {
        tracing::warn!(
            "Acesso negado: {} é {:?}, rota exige {:?}",
            identidade.uid,
            identidade.papel,
            papel
        );
        return Err(AppError::NaoAutorizado(format!(
            "rota restrita ao papel {:?}",
            papel
        ))
        .into_response());
    }

    request.extensions_mut().insert(identidade);
    Ok(next.run(request).await)
}

/// Valida o token no provedor de identidade e resolve o papel pelo perfil
async fn resolver_identidade(state: &AppState, headers: &HeaderMap) -> AppResult<Identidade> {
    let token = extrair_bearer(headers).ok_or_else(|| {
        AppError::NaoAutorizado("credencial ausente (Authorization: Bearer)".to_string())
    })?;

    let url = format!(
        "{}/accounts:lookup?key={}",
        IDENTITY_BASE_URL, state.settings.firebase.api_key
    );
    let response = state
        .http
        .post(&url)
        .json(&json!({ "idToken": token }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::NaoAutorizado(
            "token recusado pelo provedor de identidade".to_string(),
        ));
    }

    let body: Value = response.json().await?;
    let user = body
        .get("users")
        .and_then(|u| u.get(0))
        .ok_or_else(|| AppError::NaoAutorizado("token sem usuário associado".to_string()))?;
    let uid = user
        .get("localId")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::NaoAutorizado("resposta do lookup sem localId".to_string()))?
        .to_string();

    // Perfis de corretor e super-admin vivem em users/
    if let Ok(doc) = state.store.get_document(&format!("users/{}", uid)).await {
        if let Ok(corretor) = doc.deserialize::<Corretor>() {
            return identidade_de_corretor(uid, corretor);
        }
    }

    // Cliente final: o perfil é criado no primeiro login social
    let doc = state
        .store
        .get_document(&format!("clients/{}", uid))
        .await
        .map_err(|_| AppError::NaoAutorizado(format!("perfil não encontrado para {}", uid)))?;
    let perfil: PerfilCliente = doc
        .deserialize()
        .map_err(|_| AppError::NaoAutorizado(format!("perfil ilegível para {}", uid)))?;

    Ok(Identidade {
        uid,
        nome: perfil.nome,
        email: perfil.email,
        papel: Papel::Cliente,
    })
}

/// Decide o papel a partir do perfil de `users/`
///
/// Corretor desativado não autentica, mas os imóveis dele continuam na
/// vitrine.
fn identidade_de_corretor(uid: String, corretor: Corretor) -> AppResult<Identidade> {
    match corretor.role.as_str() {
        "superadmin" => Ok(Identidade {
            uid,
            nome: corretor.nome,
            email: corretor.email,
            papel: Papel::SuperAdmin,
        }),
        "corretor" if corretor.ativo() => Ok(Identidade {
            uid,
            nome: corretor.nome,
            email: corretor.email,
            papel: Papel::Corretor,
        }),
        "corretor" => Err(AppError::NaoAutorizado(
            "conta de corretor desativada".to_string(),
        )),
        outro => Err(AppError::NaoAutorizado(format!(
            "papel desconhecido: {}",
            outro
        ))),
    }
}

fn extrair_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::corretor::StatusCorretor;

    #[test]
    fn test_extrair_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer abc123".parse().unwrap());
        assert_eq!(extrair_bearer(&headers), Some("abc123"));
    }

    #[test]
    fn test_extrair_bearer_ausente_ou_malformado() {
        assert_eq!(extrair_bearer(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Basic abc".parse().unwrap());
        assert_eq!(extrair_bearer(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer ".parse().unwrap());
        assert_eq!(extrair_bearer(&headers), None);
    }

    #[test]
    fn test_corretor_ativo_autentica() {
        let corretor = Corretor::novo("uid-1", "Ana", "ana@imob.com");
        let identidade = identidade_de_corretor("uid-1".to_string(), corretor).unwrap();
        assert_eq!(identidade.papel, Papel::Corretor);
    }

    #[test]
    fn test_corretor_inativo_bloqueado() {
        let mut corretor = Corretor::novo("uid-1", "Ana", "ana@imob.com");
        corretor.status = StatusCorretor::Inativo;
        assert!(identidade_de_corretor("uid-1".to_string(), corretor).is_err());
    }

    #[test]
    fn test_superadmin() {
        let mut corretor = Corretor::novo("uid-9", "Root", "root@imob.com");
        corretor.role = "superadmin".to_string();
        let identidade = identidade_de_corretor("uid-9".to_string(), corretor).unwrap();
        assert_eq!(identidade.papel, Papel::SuperAdmin);
    }
}
