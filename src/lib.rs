// Biblioteca da plataforma Vitrine Imóveis
// Expõe módulos para uso em testes e binários

pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub store: firestore::FirestoreClient,
    pub http: reqwest::Client,
    pub imoveis: services::ImovelService,
    pub transacoes: services::TransacaoService,
    pub leads: services::LeadService,
    pub favoritos: services::FavoritoService,
    pub corretores: services::CorretorService,
    pub midia: services::MidiaService,
    pub anuncios: Option<services::AnuncioService>,
}
