/// Main Application: API da plataforma Vitrine Imóveis
///
/// Arquitetura:
/// - Vitrine pública (imóveis, página do corretor) sem autenticação
/// - Painel do corretor (imóveis, transações/kanban, leads) atrás do papel corretor
/// - Favoritos atrás do papel cliente
/// - Gestão de corretores atrás do papel superadmin
///
/// Os dados vivem no Firestore; mídia vai para o Cloudinary; a descrição de
/// anúncio vem do Gemini. Nenhuma falha remota é re-tentada: o operador
/// repete a ação.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

use vitrine_imoveis::{middleware as app_middleware, services, AppState};

mod handlers;

use vitrine_imoveis::config::Settings;
use handlers::{
    alternar_etapa, alternar_status_corretor, apagar_corretor, apagar_documento, apagar_imovel,
    apagar_imovel_admin, atualizar_corretor, atualizar_imovel, cadastrar_imovel, criar_corretor,
    criar_transacao, desmarcar_favorito, detalhe_imovel, detalhe_transacao, enviar_documento,
    enviar_foto, estatisticas, gerar_anuncio, health_check, listar_corretores, listar_documentos,
    listar_favoritos, listar_imoveis, listar_interacoes, listar_leads, marcar_favorito,
    meus_imoveis, modelos_de_processo, mover_status, pagina_corretor, quadro_transacoes,
    ready_check, registrar_interacao, status_check,
};
use vitrine_imoveis::utils::logging::*;
use vitrine_imoveis::utils::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if dotenvy::dotenv().is_err() {
        // Em produção (Cloud Run) não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Cliente do Firestore: token do metadata service no GCP, anônimo no
    // emulador local
    let store = if settings.firebase.usar_metadata_token {
        log_info("🔐 Obtendo access token do Firestore via metadata service");
        firestore::FirestoreClient::with_metadata_token(settings.firebase.project_id.clone())
            .await
            .map_err(|e| AppError::ConfigError(format!("Failed to create Firestore client: {}", e)))?
    } else {
        firestore::FirestoreClient::new(settings.firebase.project_id.clone())
            .map_err(|e| AppError::ConfigError(format!("Failed to create Firestore client: {}", e)))?
    };
    log_info(&format!(
        "✅ Firestore client configurado - projeto: {}",
        settings.firebase.project_id
    ));

    // Cliente HTTP compartilhado (identidade, mídia)
    let http = reqwest::Client::new();

    // Serviço de anúncios com IA (opcional; sem chave fica desabilitado)
    let anuncios = match settings.gemini.as_ref() {
        Some(cfg) if cfg.enabled => match cfg.api_key.as_deref() {
            Some(api_key) if !api_key.is_empty() => {
                let mut client = gemini::GeminiClient::new(api_key).map_err(|e| {
                    AppError::ConfigError(format!("Failed to create Gemini client: {}", e))
                })?;
                if let Some(model) = cfg.model.as_deref() {
                    client = client.with_model(model);
                }
                log_info(&format!(
                    "✅ Co-piloto de anúncios habilitado ({})",
                    client.model()
                ));
                Some(services::AnuncioService::new(client))
            }
            _ => {
                log_warning("⚠️  gemini.enabled sem api_key - co-piloto desabilitado");
                None
            }
        },
        _ => {
            log_info("Co-piloto de anúncios desabilitado");
            None
        }
    };

    // Inicializar estado da aplicação
    let app_state = Arc::new(AppState {
        imoveis: services::ImovelService::new(store.clone()),
        transacoes: services::TransacaoService::new(store.clone()),
        leads: services::LeadService::new(store.clone()),
        favoritos: services::FavoritoService::new(store.clone()),
        corretores: services::CorretorService::new(
            store.clone(),
            http.clone(),
            settings.firebase.api_key.clone(),
        ),
        midia: services::MidiaService::new(http.clone(), &settings.cloudinary),
        anuncios,
        store,
        http,
        settings: settings.clone(),
    });

    // Rotas públicas: health checks e vitrine
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/status", get(status_check))
        .route("/imoveis", get(listar_imoveis))
        .route("/imoveis/:id", get(detalhe_imovel))
        .route("/corretores/:id/pagina", get(pagina_corretor))
        .with_state(app_state.clone());

    // Painel do corretor
    let rotas_corretor = Router::new()
        .route("/admin/imoveis", get(meus_imoveis).post(cadastrar_imovel))
        .route(
            "/admin/imoveis/:id",
            put(atualizar_imovel).delete(apagar_imovel),
        )
        .route("/admin/imoveis/:id/fotos", post(enviar_foto))
        .route("/admin/imoveis/:id/anuncio", post(gerar_anuncio))
        .route(
            "/admin/transacoes",
            get(quadro_transacoes).post(criar_transacao),
        )
        .route("/admin/transacoes/modelos", get(modelos_de_processo))
        .route("/admin/transacoes/:id", get(detalhe_transacao))
        .route("/admin/transacoes/:id/status", put(mover_status))
        .route("/admin/transacoes/:id/etapas/:indice", put(alternar_etapa))
        .route(
            "/admin/transacoes/:id/documentos",
            get(listar_documentos).post(enviar_documento),
        )
        .route(
            "/admin/transacoes/:id/documentos/:doc",
            delete(apagar_documento),
        )
        .route("/admin/leads", get(listar_leads))
        .route(
            "/admin/leads/:cliente/interacoes",
            get(listar_interacoes).post(registrar_interacao),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            app_middleware::exigir_corretor,
        ))
        .with_state(app_state.clone());

    // Cliente final: favoritos
    let rotas_cliente = Router::new()
        .route("/favoritos", get(listar_favoritos))
        .route(
            "/favoritos/:imovel",
            post(marcar_favorito).delete(desmarcar_favorito),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            app_middleware::exigir_cliente,
        ))
        .with_state(app_state.clone());

    // Super-admin: gestão de corretores e do catálogo global
    let rotas_superadmin = Router::new()
        .route("/superadmin/estatisticas", get(estatisticas))
        .route(
            "/superadmin/corretores",
            get(listar_corretores).post(criar_corretor),
        )
        .route(
            "/superadmin/corretores/:id",
            put(atualizar_corretor).delete(apagar_corretor),
        )
        .route(
            "/superadmin/corretores/:id/status",
            put(alternar_status_corretor),
        )
        .route("/superadmin/imoveis/:id", delete(apagar_imovel_admin))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            app_middleware::exigir_superadmin,
        ))
        .with_state(app_state);

    app = app
        .merge(rotas_corretor)
        .merge(rotas_cliente)
        .merge(rotas_superadmin)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive());

    // Iniciar servidor
    // No Cloud Run, usar a variável de ambiente PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
