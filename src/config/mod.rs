use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised when a client is built from incomplete configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid URL in {0}")]
    InvalidUrl(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub supabase: SupabaseConfig,
    pub cache: CacheConfig,
    pub site: SiteConfig,
    pub theme: ThemeConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

/// Credentials for the hosted backend (auth API and storage bucket)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    #[serde(skip_serializing)]
    pub service_role_key: Option<String>,
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    pub storage_bucket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub page_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub default_domain: String,
    pub default_image: String,
    pub default_map_query: String,
    pub default_map_embed_src: String,
    pub featured_limit: usize,
    pub search_debounce_ms: u64,
    pub admin_default_email: String,
}

/// Brand colors used when the theme row is missing or partially filled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub brand: String,
    pub accent: String,
    pub bg: String,
    pub fg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub secure_cookies: bool,
    pub session_cookie: String,
}

impl SupabaseConfig {
    /// URL and anon key, as required by the session auth client
    pub fn anon_credentials(&self) -> Result<(url::Url, &str), ConfigError> {
        let url = self.base_url()?;
        let key = non_empty(&self.anon_key).ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        Ok((url, key))
    }

    /// URL and service role key, as required by the storage client
    pub fn service_credentials(&self) -> Result<(url::Url, &str), ConfigError> {
        let url = self.base_url()?;
        let key = non_empty(&self.service_role_key)
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;
        Ok((url, key))
    }

    fn base_url(&self) -> Result<url::Url, ConfigError> {
        let raw = non_empty(&self.url).ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        url::Url::parse(raw).map_err(|_| ConfigError::InvalidUrl("SUPABASE_URL"))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("IVA_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("IVA_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("APP_STORE") {
            self.database.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                _ => StoreBackend::Postgres,
            };
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // Backend credentials (NEXT_PUBLIC_* names are accepted for existing deployments)
        self.supabase.url = env::var("SUPABASE_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_URL"))
            .ok();
        self.supabase.anon_key = env::var("SUPABASE_ANON_KEY")
            .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_ANON_KEY"))
            .ok();
        self.supabase.service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY").ok();
        self.supabase.jwt_secret = env::var("SUPABASE_JWT_SECRET").ok();
        if let Ok(v) = env::var("SUPABASE_STORAGE_BUCKET") {
            self.supabase.storage_bucket = v;
        }

        // Cache overrides
        if let Ok(v) = env::var("CACHE_ENABLED") {
            self.cache.enabled = v.parse().unwrap_or(self.cache.enabled);
        }
        if let Ok(v) = env::var("CACHE_PAGE_TTL_SECS") {
            self.cache.page_ttl_secs = v.parse().unwrap_or(self.cache.page_ttl_secs);
        }

        // Site overrides
        if let Ok(v) = env::var("SITE_BASE_URL") {
            self.site.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("SITE_DEFAULT_IMAGE") {
            self.site.default_image = v;
        }
        if let Ok(v) = env::var("SITE_SEARCH_DEBOUNCE_MS") {
            self.site.search_debounce_ms = v.parse().unwrap_or(self.site.search_debounce_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIES") {
            self.security.secure_cookies = v.parse().unwrap_or(self.security.secure_cookies);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections: 5,
                connection_timeout: 30,
                run_migrations: true,
            },
            supabase: SupabaseConfig::empty(),
            cache: CacheConfig {
                enabled: true,
                page_ttl_secs: 60,
            },
            site: SiteConfig::iva(),
            theme: ThemeConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string()],
                secure_cookies: false,
                session_cookie: "iva_admin_session".to_string(),
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections: 10,
                connection_timeout: 10,
                run_migrations: true,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.iva.co.za".to_string()],
                secure_cookies: true,
                session_cookie: "iva_admin_session".to_string(),
            },
            ..Self::development()
        }
        .in_environment(Environment::Staging)
    }

    pub fn production() -> Self {
        Self {
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                max_connections: 20,
                connection_timeout: 5,
                run_migrations: false,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://IVA.co.za".to_string()],
                secure_cookies: true,
                session_cookie: "iva_admin_session".to_string(),
            },
            ..Self::development()
        }
        .in_environment(Environment::Production)
    }

    fn in_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl SupabaseConfig {
    pub fn empty() -> Self {
        Self {
            url: None,
            anon_key: None,
            service_role_key: None,
            jwt_secret: None,
            storage_bucket: "gallery".to_string(),
        }
    }
}

impl SiteConfig {
    fn iva() -> Self {
        Self {
            base_url: "https://IVA.co.za".to_string(),
            default_domain: "https://IVA.co.za".to_string(),
            default_image: "/og-image.png".to_string(),
            default_map_query: "IVA, Klerksdorp".to_string(),
            default_map_embed_src: "https://www.google.com/maps/embed?pb=...".to_string(),
            featured_limit: 8,
            search_debounce_ms: 250,
            admin_default_email: "admin@IVA.co.za".to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            brand: "#ED1944".to_string(),
            accent: "#ED5A75".to_string(),
            bg: "#FAF7F2".to_string(),
            fg: "#0B1220".to_string(),
        }
    }
}
