use localset_core::constants::DEFAULT_LANGUAGE;

pub struct Config {
    pub db_path: String,
    pub language: String,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_path =
            std::env::var("LOCALSET_DB_PATH").unwrap_or_else(|_| "./db/settings.db".into());
        let language = std::env::var("LOCALSET_LANGUAGE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.into());
        let log_format = std::env::var("LOCALSET_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        Self {
            db_path,
            language,
            log_format,
        }
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_overrides(mut self, db_path: Option<String>, language: Option<String>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(language) = language {
            self.language = language;
        }
        self
    }
}
