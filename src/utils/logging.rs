use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!("Request processed: {} - Status: {} - Duration: {}ms",
          endpoint, status, duration_ms);
}

pub fn log_transacao_criada(transacao_id: &str, nome_cliente: &str, tipo_processo: &str) {
    info!("Transação criada: {} - Cliente: {} - Processo: {}",
          transacao_id, nome_cliente, tipo_processo);
}

pub fn log_transacao_movida(transacao_id: &str, status: &str) {
    info!("Transação {} movida para '{}'", transacao_id, status);
}

pub fn log_firestore_error(operation: &str, error: &str) {
    error!("Firestore error: {} - {}", operation, error);
}

pub fn log_upload_concluido(url: &str) {
    info!("Upload concluído no host de mídia: {}", url);
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 Vitrine Imóveis server starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
