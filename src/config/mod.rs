use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
    pub messaging: MessagingConfig,
}

#[derive(Debug, Clone)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 signing secret. Empty means unconfigured: every protected
    /// request is denied, but the process still starts.
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom S3-compatible endpoint (e.g. R2/MinIO). None means AWS.
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub link_expiry_secs: u64,
}

#[derive(Debug, Clone)]
pub struct MessagingConfig {
    pub api_base: String,
    pub phone_number_id: String,
    pub access_token: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::defaults(environment).with_env_overrides()
    }

    fn defaults(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_cors: true,
            },
            storage: StorageConfig {
                bucket: String::new(),
                region: "us-east-1".to_string(),
                endpoint: None,
                access_key_id: String::new(),
                secret_access_key: String::new(),
                link_expiry_secs: 3600,
            },
            messaging: MessagingConfig {
                api_base: "https://graph.facebook.com/v20.0".to_string(),
                phone_number_id: String::new(),
                access_token: String::new(),
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("RESOURCE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
        {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Storage overrides
        if let Ok(v) = env::var("S3_BUCKET") {
            self.storage.bucket = v;
        }
        if let Ok(v) = env::var("S3_REGION") {
            self.storage.region = v;
        }
        if let Ok(v) = env::var("S3_ENDPOINT") {
            if !v.trim().is_empty() {
                self.storage.endpoint = Some(v);
            }
        }
        if let Ok(v) = env::var("S3_ACCESS_KEY_ID") {
            self.storage.access_key_id = v;
        }
        if let Ok(v) = env::var("S3_SECRET_ACCESS_KEY") {
            self.storage.secret_access_key = v;
        }
        if let Ok(v) = env::var("S3_LINK_EXPIRY_SECS") {
            self.storage.link_expiry_secs = v.parse().unwrap_or(self.storage.link_expiry_secs);
        }

        // Messaging overrides
        if let Ok(v) = env::var("WHATSAPP_API_BASE") {
            self.messaging.api_base = v;
        }
        if let Ok(v) = env::var("WHATSAPP_PHONE_NUMBER_ID") {
            self.messaging.phone_number_id = v;
        }
        if let Ok(v) = env::var("WHATSAPP_ACCESS_TOKEN") {
            self.messaging.access_token = v;
        }

        self
    }
}

// Global singleton config - initialized once at startup, read-only afterwards
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
