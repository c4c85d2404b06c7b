use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::middleware::Identidade;
use vitrine_imoveis::models::NovaInteracao;
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::AppResult;
use vitrine_imoveis::AppState;

/// Leads do corretor: clientes que favoritaram imóveis dele, o mais recente
/// primeiro. Clientes com perfil não resolvido vêm em `clientesIgnorados`.
pub async fn listar_leads(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/leads", "GET");

    let agregacao = state.leads.listar(&identidade.uid).await?;

    Ok(Json(json!({
        "success": true,
        "count": agregacao.leads.len(),
        "leads": agregacao.leads,
        "clientesIgnorados": agregacao.clientes_ignorados,
    })))
}

pub async fn registrar_interacao(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(cliente_id): Path<String>,
    Json(payload): Json<NovaInteracao>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/leads/:cliente/interacoes", "POST");

    let interacao = state
        .leads
        .registrar_interacao(&identidade.uid, &cliente_id, payload)
        .await?;
    Ok(Json(json!({ "success": true, "interacao": interacao })))
}

pub async fn listar_interacoes(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(cliente_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/leads/:cliente/interacoes", "GET");

    let interacoes = state
        .leads
        .listar_interacoes(&identidade.uid, &cliente_id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "count": interacoes.len(),
        "interacoes": interacoes,
    })))
}
