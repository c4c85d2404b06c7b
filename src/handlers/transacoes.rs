use axum::extract::{Multipart, Path, State};
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::middleware::Identidade;
use vitrine_imoveis::models::{NovaTransacao, StatusTransacao, TipoProcesso};
use vitrine_imoveis::services::projetar_quadro;
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::{AppError, AppResult};
use vitrine_imoveis::AppState;

use super::imoveis::ler_arquivo;

/// Quadro kanban do corretor: as quatro colunas fixas
pub async fn quadro_transacoes(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes", "GET");

    let transacoes = state.transacoes.listar(&identidade.uid).await?;
    let quadro = projetar_quadro(transacoes);

    Ok(Json(json!({
        "success": true,
        "total": quadro.total(),
        "quadro": quadro,
    })))
}

/// Tabela fixa de modelos de processo, para o modal de nova transação
pub async fn modelos_de_processo() -> Json<Value> {
    log_request_received("/admin/transacoes/modelos", "GET");

    let modelos: Vec<Value> = TipoProcesso::TODOS
        .iter()
        .map(|tipo| {
            json!({
                "nome": tipo.nome(),
                "etapas": tipo.nomes_das_etapas(),
            })
        })
        .collect();

    Json(json!({ "success": true, "modelos": modelos }))
}

pub async fn criar_transacao(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Json(payload): Json<NovaTransacao>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes", "POST");

    let transacao = state.transacoes.criar(&identidade.uid, payload).await?;
    Ok(Json(json!({ "success": true, "transacao": transacao })))
}

pub async fn detalhe_transacao(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(transacao_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes/:id", "GET");

    let transacao = state.transacoes.buscar(&identidade.uid, &transacao_id).await?;
    let progresso = transacao.progresso();

    Ok(Json(json!({
        "success": true,
        "transacao": transacao,
        "progresso": progresso,
    })))
}

#[derive(Debug, Deserialize)]
pub struct MoverStatusPayload {
    pub status: StatusTransacao,
}

/// Move a transação para outra coluna do quadro (sem tabela de transições)
pub async fn mover_status(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(transacao_id): Path<String>,
    Json(payload): Json<MoverStatusPayload>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes/:id/status", "PUT");

    let transacao = state
        .transacoes
        .mover_status(&identidade.uid, &transacao_id, payload.status)
        .await?;
    Ok(Json(json!({ "success": true, "transacao": transacao })))
}

/// Alterna uma etapa do checklist entre pendente e concluído
pub async fn alternar_etapa(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path((transacao_id, indice)): Path<(String, usize)>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes/:id/etapas/:indice", "PUT");

    let transacao = state
        .transacoes
        .alternar_etapa(&identidade.uid, &transacao_id, indice)
        .await?;
    let progresso = transacao.progresso();

    Ok(Json(json!({
        "success": true,
        "transacao": transacao,
        "progresso": progresso,
    })))
}

/// Sobe um documento para o host de mídia e registra na transação
///
/// O form traz o arquivo em `file` e a descrição em `nomeArquivo`. Se o
/// upload falha, nenhum registro é criado.
pub async fn enviar_documento(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(transacao_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes/:id/documentos", "POST");

    let arquivo = ler_arquivo(multipart).await?;
    let nome_exibido = arquivo
        .campos
        .get("nomeArquivo")
        .cloned()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("dê um nome ao arquivo".to_string()))?;

    let url = state
        .midia
        .upload(&arquivo.nome, &arquivo.content_type, arquivo.bytes)
        .await?;

    let documento = state
        .transacoes
        .anexar_documento(&identidade.uid, &transacao_id, nome_exibido, url)
        .await?;

    Ok(Json(json!({ "success": true, "documento": documento })))
}

pub async fn listar_documentos(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(transacao_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes/:id/documentos", "GET");

    let documentos = state
        .transacoes
        .listar_documentos(&identidade.uid, &transacao_id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "count": documentos.len(),
        "documentos": documentos,
    })))
}

pub async fn apagar_documento(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path((transacao_id, documento_id)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/transacoes/:id/documentos/:doc", "DELETE");

    state
        .transacoes
        .apagar_documento(&identidade.uid, &transacao_id, &documento_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}
