use std::env;
use std::fmt;

/// Target usado fora de produção
pub const LOCAL_MONGODB_URI: &str = "mongodb://127.0.0.1:27017/users_api";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

/// Which key `GET /auth/user/{key}` resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserLookup {
    #[default]
    Id,
    Username,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub mongodb_uri: String,
    pub host: String,
    pub port: u16,
    pub user_lookup: UserLookup,
}

impl AppConfig {
    /// Reads configuration from the process environment (call `dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key → value source.
    ///
    /// In production the connection target is `MONGODB_URI`; when it is missing the
    /// target is left empty and the connection fails at startup instead of aborting.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let mongodb_uri = match environment {
            Environment::Production => lookup("MONGODB_URI").unwrap_or_default(),
            Environment::Development => LOCAL_MONGODB_URI.to_string(),
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("⚠️  Invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let user_lookup = match lookup("USER_LOOKUP").as_deref() {
            Some("username") => UserLookup::Username,
            _ => UserLookup::Id,
        };

        Self {
            environment,
            mongodb_uri,
            host,
            port,
            user_lookup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn development_uses_local_target() {
        let config = config_from(&[("MONGODB_URI", "mongodb+srv://prod.example/db")]);

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.mongodb_uri, LOCAL_MONGODB_URI);
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.user_lookup, UserLookup::Id);
    }

    #[test]
    fn production_uses_secret_target() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("MONGODB_URI", "mongodb+srv://prod.example/db"),
        ]);

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.mongodb_uri, "mongodb+srv://prod.example/db");
    }

    #[test]
    fn production_without_secret_yields_empty_target() {
        let config = config_from(&[("APP_ENV", "production")]);

        assert_eq!(config.mongodb_uri, "");
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 3000);

        let config = config_from(&[("PORT", "8080"), ("HOST", "127.0.0.1")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn username_lookup_switch() {
        let config = config_from(&[("USER_LOOKUP", "username")]);
        assert_eq!(config.user_lookup, UserLookup::Username);

        let config = config_from(&[("USER_LOOKUP", "something-else")]);
        assert_eq!(config.user_lookup, UserLookup::Id);
    }
}
