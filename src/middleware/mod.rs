pub mod auth;

pub use auth::{exigir_cliente, exigir_corretor, exigir_superadmin, Identidade, Papel};
