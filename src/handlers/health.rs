use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "vitrine-imoveis",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn ready_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    // Testa a conexão com o banco de documentos
    let firestore_status = match state.imoveis.listar_publico().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    let overall_ready = firestore_status == "connected";

    let response = json!({
        "ready": overall_ready,
        "service": "vitrine-imoveis",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "firestore": {
                "status": firestore_status,
                "project_id": state.settings.firebase.project_id
            }
        }
    });

    if overall_ready {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let cloudinary_configured = !state.settings.cloudinary.cloud_name.is_empty();
    let gemini_enabled = state.anuncios.is_some();

    Json(json!({
        "service": "vitrine-imoveis",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
        "integrations": {
            "firestore": {
                "project_id": state.settings.firebase.project_id,
                "metadata_token": state.settings.firebase.usar_metadata_token
            },
            "cloudinary": {
                "configured": cloudinary_configured,
                "cloud_name": state.settings.cloudinary.cloud_name
            },
            "gemini": {
                "enabled": gemini_enabled
            }
        }
    }))
}
