use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::middleware::Identidade;
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::AppResult;
use vitrine_imoveis::AppState;

/// Marca um imóvel como favorito do cliente autenticado
pub async fn marcar_favorito(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(imovel_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/favoritos/:imovel", "POST");

    // snapshot dos campos de exibição vem do imóvel no momento da marcação
    let imovel = state.imoveis.buscar(&imovel_id).await?;
    let favorito = state.favoritos.marcar(&identidade.uid, &imovel).await?;

    Ok(Json(json!({ "success": true, "favorito": favorito })))
}

pub async fn desmarcar_favorito(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(imovel_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/favoritos/:imovel", "DELETE");

    state.favoritos.desmarcar(&identidade.uid, &imovel_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn listar_favoritos(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Json<Value>> {
    log_request_received("/favoritos", "GET");

    let favoritos = state.favoritos.listar(&identidade.uid).await?;
    Ok(Json(json!({
        "success": true,
        "count": favoritos.len(),
        "favoritos": favoritos,
    })))
}
