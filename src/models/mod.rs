pub mod checklist;
pub mod cliente;
pub mod corretor;
pub mod favorito;
pub mod imovel;
pub mod interacao;
pub mod lead;
pub mod transacao;

pub use checklist::{Etapa, EtapaStatus, TipoProcesso};
pub use cliente::PerfilCliente;
pub use corretor::{Corretor, Personalizacao, StatusCorretor};
pub use favorito::{Favorito, FavoritoDeCliente};
pub use imovel::{Caracteristicas, Endereco, Finalidade, Imovel, NovoImovel, StatusImovel, TipoImovel};
pub use interacao::{Interacao, NovaInteracao, TipoInteracao};
pub use lead::{AgregacaoLeads, Lead};
pub use transacao::{DocumentoTransacao, NovaTransacao, StatusTransacao, Transacao};
