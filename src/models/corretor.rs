//! Corretor: o ator autenticado que cadastra imóveis e conduz transações

use serde::{Deserialize, Serialize};

/// Status da conta do corretor na plataforma
///
/// Corretores inativos continuam existindo (os imóveis ficam no ar) mas não
/// conseguem autenticar no painel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCorretor {
    Ativo,
    Inativo,
}

impl StatusCorretor {
    pub fn alternado(&self) -> Self {
        match self {
            StatusCorretor::Ativo => StatusCorretor::Inativo,
            StatusCorretor::Inativo => StatusCorretor::Ativo,
        }
    }
}

/// Personalização da página pública do corretor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personalizacao {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

/// Perfil do corretor na coleção `users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corretor {
    pub uid: String,
    pub nome: String,
    pub email: String,
    pub role: String,
    #[serde(default = "padrao_ativo")]
    pub status: StatusCorretor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalizacao: Option<Personalizacao>,
}

// Perfis antigos não têm o campo status; valem como ativos
fn padrao_ativo() -> StatusCorretor {
    StatusCorretor::Ativo
}

impl Corretor {
    pub fn novo(uid: impl Into<String>, nome: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            nome: nome.into(),
            email: email.into(),
            role: "corretor".to_string(),
            status: StatusCorretor::Ativo,
            personalizacao: None,
        }
    }

    pub fn ativo(&self) -> bool {
        self.status == StatusCorretor::Ativo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_novo_corretor_ativo() {
        let c = Corretor::novo("uid-1", "Ana", "ana@imob.com");
        assert!(c.ativo());
        assert_eq!(c.role, "corretor");
    }

    #[test]
    fn test_perfil_sem_status_vale_como_ativo() {
        let json = serde_json::json!({
            "uid": "uid-2",
            "nome": "Bruno",
            "email": "bruno@imob.com",
            "role": "corretor"
        });
        let c: Corretor = serde_json::from_value(json).unwrap();
        assert!(c.ativo());
    }

    #[test]
    fn test_alternar_status() {
        assert_eq!(StatusCorretor::Ativo.alternado(), StatusCorretor::Inativo);
        assert_eq!(StatusCorretor::Inativo.alternado(), StatusCorretor::Ativo);
    }
}
