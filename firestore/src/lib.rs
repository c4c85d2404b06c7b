//! Cliente REST do Firestore
//!
//! Cobre o subconjunto da API v1 que a plataforma usa:
//! - leitura pontual, criação, patch com `updateMask` e remoção de documentos
//! - `runQuery` com filtros de igualdade, ordenação simples e limite
//! - queries de collection group (`allDescendants`) para varrer subcoleções
//!
//! Os valores do Firestore (`stringValue`, `integerValue`, `mapValue`, ...)
//! são convertidos de/para `serde_json::Value` pelo módulo [`value`], então
//! o restante da aplicação trabalha só com JSON comum e serde.

pub mod client;
pub mod documents;
pub mod error;
pub mod query;
pub mod value;

pub use client::FirestoreClient;
pub use documents::Document;
pub use error::{FirestoreError, Result};
pub use query::{Direction, StructuredQuery};
