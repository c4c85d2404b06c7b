use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::services::NovoCorretor;
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::AppResult;
use vitrine_imoveis::AppState;

/// Estatísticas do painel do super-admin
pub async fn estatisticas(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/estatisticas", "GET");

    let imoveis = state.imoveis.listar_publico().await?;
    let stats = state.corretores.estatisticas(&imoveis).await?;

    Ok(Json(json!({ "success": true, "estatisticas": stats })))
}

pub async fn listar_corretores(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/corretores", "GET");

    let corretores = state.corretores.listar().await?;
    Ok(Json(json!({
        "success": true,
        "count": corretores.len(),
        "corretores": corretores,
    })))
}

pub async fn criar_corretor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NovoCorretor>,
) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/corretores", "POST");

    let corretor = state.corretores.criar(payload).await?;
    Ok(Json(json!({ "success": true, "corretor": corretor })))
}

#[derive(Debug, Deserialize)]
pub struct AtualizarCorretorPayload {
    pub nome: String,
}

pub async fn atualizar_corretor(
    State(state): State<Arc<AppState>>,
    Path(corretor_id): Path<String>,
    Json(payload): Json<AtualizarCorretorPayload>,
) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/corretores/:id", "PUT");

    let corretor = state
        .corretores
        .atualizar_nome(&corretor_id, payload.nome)
        .await?;
    Ok(Json(json!({ "success": true, "corretor": corretor })))
}

/// Alterna o corretor entre ativo e inativo
pub async fn alternar_status_corretor(
    State(state): State<Arc<AppState>>,
    Path(corretor_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/corretores/:id/status", "PUT");

    let corretor = state.corretores.alternar_status(&corretor_id).await?;
    Ok(Json(json!({ "success": true, "corretor": corretor })))
}

pub async fn apagar_corretor(
    State(state): State<Arc<AppState>>,
    Path(corretor_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/corretores/:id", "DELETE");

    state.corretores.apagar(&corretor_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Remoção administrativa de um imóvel, de qualquer corretor
pub async fn apagar_imovel_admin(
    State(state): State<Arc<AppState>>,
    Path(imovel_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/superadmin/imoveis/:id", "DELETE");

    state.imoveis.apagar_como_admin(&imovel_id).await?;
    Ok(Json(json!({ "success": true })))
}
