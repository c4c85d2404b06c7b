use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub firebase: FirebaseSettings,
    pub cloudinary: CloudinarySettings,
    pub gemini: Option<GeminiSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FirebaseSettings {
    /// Projeto do Firestore e do Identity Toolkit
    pub project_id: String,
    /// Web API key, usada nas chamadas ao identitytoolkit (lookup/signUp)
    pub api_key: String,
    /// Quando true, busca o access token do Firestore no metadata service
    #[serde(default)]
    pub usar_metadata_token: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CloudinarySettings {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiSettings {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Variáveis de ambiente mais comuns em deploy
        if let Ok(project_id) = std::env::var("FIREBASE_PROJECT_ID") {
            builder = builder.set_override("firebase.project_id", project_id)?;
        }
        if let Ok(api_key) = std::env::var("FIREBASE_API_KEY") {
            builder = builder.set_override("firebase.api_key", api_key)?;
        }
        if let Ok(cloud_name) = std::env::var("CLOUDINARY_CLOUD_NAME") {
            builder = builder.set_override("cloudinary.cloud_name", cloud_name)?;
        }
        if let Ok(preset) = std::env::var("CLOUDINARY_UPLOAD_PRESET") {
            builder = builder.set_override("cloudinary.upload_preset", preset)?;
        }
        if let Ok(gemini_key) = std::env::var("GEMINI_API_KEY") {
            builder = builder.set_override("gemini.api_key", gemini_key)?;
            builder = builder.set_override("gemini.enabled", true)?;
        }

        // Overrides com prefixo da plataforma (VITRINE_SERVER__PORT etc.)
        builder = builder.add_source(Environment::with_prefix("VITRINE").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
