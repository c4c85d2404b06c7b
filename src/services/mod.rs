pub mod anuncio;
pub mod corretores;
pub mod favoritos;
pub mod imoveis;
pub mod kanban;
pub mod leads;
pub mod midia;
pub mod transacoes;

pub use anuncio::AnuncioService;
pub use corretores::{CorretorService, Estatisticas, NovoCorretor};
pub use favoritos::FavoritoService;
pub use imoveis::ImovelService;
pub use kanban::{projetar_quadro, QuadroKanban};
pub use leads::{agrupar_leads, LeadService};
pub use midia::MidiaService;
pub use transacoes::TransacaoService;
