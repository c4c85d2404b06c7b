pub mod error;
pub mod logging;
pub mod texto;
pub mod whatsapp;

pub use error::*;
pub use texto::formatar_preco_brl;
pub use whatsapp::{link_whatsapp, link_whatsapp_com_mensagem};
