use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres URL; when absent the in-memory store is used
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HMAC secret for session cookies. Login fails with 500 while empty.
    #[serde(skip_serializing)]
    pub session_secret: String,
    pub session_expiry_hours: u64,
    pub cookie_name: String,
    pub secure_cookie: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
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
        if let Ok(v) = env::var("NEWS_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("NEWS_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = v.parse().unwrap_or(self.security.session_expiry_hours);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            if !v.trim().is_empty() {
                self.security.cookie_name = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("SESSION_SECURE_COOKIE") {
            self.security.secure_cookie = v.parse().unwrap_or(self.security.secure_cookie);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                session_secret: "development-session-secret".to_string(),
                session_expiry_hours: 24 * 14, // 2 weeks
                cookie_name: "sessionid".to_string(),
                secure_cookie: false,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_expiry_hours: 24,
                cookie_name: "sessionid".to_string(),
                secure_cookie: true,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                session_expiry_hours: 8,
                cookie_name: "sessionid".to_string(),
                secure_cookie: true,
                enable_cors: false,
                cors_origins: vec![],
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.security.session_secret.is_empty());
        assert!(!config.security.secure_cookie);
        assert!(config.database.url.is_none());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.session_secret.is_empty());
        assert!(config.security.secure_cookie);
        assert!(!config.security.enable_cors);
    }

    #[test]
    fn secret_is_never_serialized() {
        let json = serde_json::to_value(AppConfig::development()).unwrap();
        assert!(json["security"].get("session_secret").is_none());
    }
}
