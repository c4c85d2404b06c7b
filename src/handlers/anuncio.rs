use axum::extract::{Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::middleware::Identidade;
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::{AppError, AppResult};
use vitrine_imoveis::AppState;

/// Gera a descrição de anúncio de um imóvel do corretor com o co-piloto de IA
pub async fn gerar_anuncio(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(imovel_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/imoveis/:id/anuncio", "POST");

    let anuncios = state.anuncios.as_ref().ok_or_else(|| {
        AppError::ConfigError("co-piloto de IA não configurado (GEMINI_API_KEY)".to_string())
    })?;

    let imovel = state.imoveis.buscar(&imovel_id).await?;
    if imovel.corretor_id != identidade.uid {
        return Err(AppError::NaoEncontrado(format!("imóvel {}", imovel_id)));
    }

    let descricao = anuncios.gerar_descricao(&imovel).await?;

    Ok(Json(json!({
        "success": true,
        "imovelId": imovel_id,
        "descricao": descricao,
    })))
}
