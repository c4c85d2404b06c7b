use axum::extract::{Multipart, Path, State};
use axum::response::Json;
use axum::Extension;
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::middleware::Identidade;
use vitrine_imoveis::models::NovoImovel;
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::{link_whatsapp_com_mensagem, AppError, AppResult};
use vitrine_imoveis::AppState;

/// Vitrine pública: todos os imóveis, mais recentes primeiro
pub async fn listar_imoveis(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    log_request_received("/imoveis", "GET");

    let imoveis = state.imoveis.listar_publico().await?;
    Ok(Json(json!({
        "success": true,
        "count": imoveis.len(),
        "imoveis": imoveis,
    })))
}

/// Detalhe público com corretor responsável e link de contato
pub async fn detalhe_imovel(
    State(state): State<Arc<AppState>>,
    Path(imovel_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/imoveis/:id", "GET");

    let (imovel, corretor) = state.imoveis.buscar_com_corretor(&imovel_id).await?;

    let whatsapp = corretor.as_ref().and_then(|c| {
        let telefone = c.personalizacao.as_ref().and_then(|p| p.whatsapp.as_deref());
        let mensagem = format!(
            "Olá! Vi o imóvel {} na vitrine e gostaria de mais informações.",
            imovel.titulo
        );
        link_whatsapp_com_mensagem(telefone, &mensagem)
    });

    Ok(Json(json!({
        "success": true,
        "imovel": imovel,
        "corretor": corretor,
        "whatsapp": whatsapp,
    })))
}

/// Página pública do corretor: perfil + imóveis dele
pub async fn pagina_corretor(
    State(state): State<Arc<AppState>>,
    Path(corretor_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/corretores/:id/pagina", "GET");

    let corretor = state.corretores.buscar(&corretor_id).await?;
    let imoveis = state.imoveis.listar_do_corretor(&corretor_id).await?;

    let whatsapp = vitrine_imoveis::utils::link_whatsapp(
        corretor
            .personalizacao
            .as_ref()
            .and_then(|p| p.whatsapp.as_deref()),
    );

    Ok(Json(json!({
        "success": true,
        "corretor": corretor,
        "imoveis": imoveis,
        "whatsapp": whatsapp,
    })))
}

/// Painel do corretor: os imóveis dele
pub async fn meus_imoveis(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/imoveis", "GET");

    let imoveis = state.imoveis.listar_do_corretor(&identidade.uid).await?;
    Ok(Json(json!({
        "success": true,
        "count": imoveis.len(),
        "imoveis": imoveis,
    })))
}

pub async fn cadastrar_imovel(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Json(payload): Json<NovoImovel>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/imoveis", "POST");

    let imovel = state.imoveis.criar(&identidade.uid, payload).await?;
    Ok(Json(json!({ "success": true, "imovel": imovel })))
}

pub async fn atualizar_imovel(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(imovel_id): Path<String>,
    Json(payload): Json<NovoImovel>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/imoveis/:id", "PUT");

    let imovel = state
        .imoveis
        .atualizar(&identidade.uid, &imovel_id, payload)
        .await?;
    Ok(Json(json!({ "success": true, "imovel": imovel })))
}

pub async fn apagar_imovel(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(imovel_id): Path<String>,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/imoveis/:id", "DELETE");

    state.imoveis.apagar(&identidade.uid, &imovel_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Sobe uma foto para o host de mídia e anexa a URL ao imóvel
pub async fn enviar_foto(
    State(state): State<Arc<AppState>>,
    Extension(identidade): Extension<Identidade>,
    Path(imovel_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    log_request_received("/admin/imoveis/:id/fotos", "POST");

    let arquivo = ler_arquivo(multipart).await?;
    let url = state
        .midia
        .upload(&arquivo.nome, &arquivo.content_type, arquivo.bytes)
        .await?;

    let imovel = state
        .imoveis
        .adicionar_foto(&identidade.uid, &imovel_id, url.clone())
        .await?;

    Ok(Json(json!({ "success": true, "url": url, "imovel": imovel })))
}

pub struct ArquivoEnviado {
    pub nome: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Campos de texto que acompanham o arquivo (ex.: nomeArquivo)
    pub campos: std::collections::HashMap<String, String>,
}

/// Extrai o campo `file` (e campos de texto) de um form multipart
pub async fn ler_arquivo(mut multipart: Multipart) -> AppResult<ArquivoEnviado> {
    let mut arquivo: Option<(String, String, Vec<u8>)> = None;
    let mut campos = std::collections::HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("multipart inválido: {}", e)))?
    {
        let nome_campo = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            let nome = field.file_name().unwrap_or("arquivo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::ValidationError(format!("falha ao ler arquivo: {}", e)))?
                .to_vec();
            arquivo = Some((nome, content_type, bytes));
        } else {
            let valor = field
                .text()
                .await
                .map_err(|e| AppError::ValidationError(format!("falha ao ler campo: {}", e)))?;
            campos.insert(nome_campo, valor);
        }
    }

    let (nome, content_type, bytes) = arquivo
        .ok_or_else(|| AppError::ValidationError("selecione um arquivo".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::ValidationError("arquivo vazio".to_string()));
    }

    Ok(ArquivoEnviado {
        nome,
        content_type,
        bytes,
        campos,
    })
}
