pub mod anuncio;
pub mod corretores;
pub mod favoritos;
pub mod health;
pub mod imoveis;
pub mod leads;
pub mod transacoes;

pub use anuncio::*;
pub use corretores::*;
pub use favoritos::*;
pub use health::*;
pub use imoveis::*;
pub use leads::*;
pub use transacoes::*;
