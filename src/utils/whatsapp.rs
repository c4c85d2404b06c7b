//! Montagem de links `wa.me` para contato direto com o corretor

/// Monta a URL do WhatsApp a partir do telefone cadastrado na personalização
///
/// O telefone pode vir formatado ("(62) 99999-0000"); só os dígitos entram
/// na URL. Devolve `None` quando não há telefone ou ele não tem dígitos.
pub fn link_whatsapp(telefone: Option<&str>) -> Option<String> {
    let telefone = telefone?;
    let digitos: String = telefone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digitos.is_empty() {
        return None;
    }

    Some(format!("https://wa.me/{}", digitos))
}

/// Variante com mensagem pré-preenchida (aba de contato de um imóvel)
pub fn link_whatsapp_com_mensagem(telefone: Option<&str>, mensagem: &str) -> Option<String> {
    let base = link_whatsapp(telefone)?;
    if mensagem.is_empty() {
        return Some(base);
    }
    Some(format!("{}?text={}", base, urlencoding::encode(mensagem)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_remove_formatacao() {
        let link = link_whatsapp(Some("+55 (62) 99999-0000")).unwrap();
        assert_eq!(link, "https://wa.me/5562999990000");
    }

    #[test]
    fn test_sem_telefone_sem_link() {
        assert_eq!(link_whatsapp(None), None);
        assert_eq!(link_whatsapp(Some("sem numero")), None);
    }

    #[test]
    fn test_mensagem_pre_preenchida() {
        let link = link_whatsapp_com_mensagem(
            Some("5562999990000"),
            "Olá! Vi o imóvel Casa no Centro e gostaria de mais informações.",
        )
        .unwrap();

        assert!(link.starts_with("https://wa.me/5562999990000?text="));
        assert!(link.contains("Ol%C3%A1"));
        assert!(!link.contains(' '));
    }
}
