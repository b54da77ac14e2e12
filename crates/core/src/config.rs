//! Environment-driven application configuration.
//!
//! All settings are read once at startup into an [`AppConfig`] and handed to
//! the components that need them. Nothing else in the workspace reads the
//! process environment.

use std::fmt;
use std::str::FromStr;

use crate::env_config::{env_non_empty, parse_with_default};
use crate::{
    AUTH_TIMEOUT_SECS, ConfigError, DEFAULT_PAGE_SIZE, LLM_TIMEOUT_SECS, MAX_PAGE_SIZE,
};

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://127.0.0.1:3000,https://travelling-gpt.vercel.app";
const DEFAULT_CLERK_API_URL: &str = "https://api.clerk.com";
const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_LLM_MODEL: &str = "deepseek-chat";

/// Deployment mode. Decides which token verification strategies are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidChoice {
                var: "ENVIRONMENT",
                value: s.to_owned(),
                expected: "development, production",
            }),
        }
    }
}

/// LLM vendors the gateway knows about. Only DeepSeek is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    DeepSeek,
    OpenAi,
    Anthropic,
    Google,
}

impl LlmProvider {
    /// Stable lowercase name, stored with every session record.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Human-readable vendor name used in error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DeepSeek => "DeepSeek",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google Gemini",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(Self::DeepSeek),
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            _ => Err(ConfigError::InvalidChoice {
                var: "LLM_PROVIDER",
                value: s.to_owned(),
                expected: "deepseek, openai, anthropic, google",
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub environment: Environment,
    pub clerk_secret_key: Option<String>,
    pub clerk_api_url: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("environment", &self.environment)
            .field("clerk_secret_key", &self.clerk_secret_key.as_ref().map(|_| "***"))
            .field("clerk_api_url", &self.clerk_api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            clerk_secret_key: None,
            clerk_api_url: DEFAULT_CLERK_API_URL.to_owned(),
            timeout_secs: AUTH_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::DeepSeek,
            api_key: None,
            base_url: DEFAULT_DEEPSEEK_BASE_URL.to_owned(),
            model: DEFAULT_LLM_MODEL.to_owned(),
            max_tokens: 2000,
            temperature: 0.3,
            timeout_secs: LLM_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { default_page_size: DEFAULT_PAGE_SIZE, max_page_size: MAX_PAGE_SIZE }
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    /// `None` means no PostgreSQL is configured; the memory store is used.
    pub url: Option<String>,
}

impl DatabaseConfig {
    /// URL with the credentials masked, safe to log.
    pub fn redacted_url(&self) -> Option<String> {
        self.url.as_deref().map(|url| match url.split_once('@') {
            Some((_, host)) => format!("***@{host}"),
            None => url.to_owned(),
        })
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig").field("url", &self.redacted_url()).finish()
    }
}

/// Complete process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub pagination: PaginationConfig,
    /// Default `tracing` directive derived from `LOG_LEVEL`.
    pub log_directive: &'static str,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_non_empty)
    }

    /// Reads configuration through `lookup`, which returns trimmed, non-blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var);
        let parse = |var: &'static str, default| parse_with_default(var, get(var).as_deref(), default);

        let server = ServerConfig {
            host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_with_default("API_PORT", get("API_PORT").as_deref(), 8000_u16),
            cors_origins: split_origins(
                get("CORS_ORIGINS").as_deref().unwrap_or(DEFAULT_CORS_ORIGINS),
            ),
        };

        let environment = get("ENVIRONMENT")
            .map(|v| v.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();
        let clerk_secret_key = get("CLERK_SECRET_KEY");
        if let Some(key) = clerk_secret_key.as_deref() {
            require_prefix("CLERK_SECRET_KEY", key, "sk_")?;
        }
        let auth = AuthConfig {
            environment,
            clerk_secret_key,
            clerk_api_url: trim_url(get("CLERK_API_URL").as_deref().unwrap_or(DEFAULT_CLERK_API_URL)),
            timeout_secs: parse("AUTH_TIMEOUT_SECS", AUTH_TIMEOUT_SECS),
        };

        let database = DatabaseConfig { url: database_url(&get) };

        let provider =
            get("LLM_PROVIDER").map(|v| v.parse::<LlmProvider>()).transpose()?.unwrap_or_default();
        let api_key = get("DEEPSEEK_API_KEY");
        if let Some(key) = api_key.as_deref() {
            require_prefix("DEEPSEEK_API_KEY", key, "sk-")?;
        }
        let defaults = LlmConfig::default();
        let temperature = parse_with_default("TEMPERATURE", get("TEMPERATURE").as_deref(), defaults.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                var: "TEMPERATURE",
                reason: format!("{temperature} is outside 0.0..=2.0"),
            });
        }
        let llm = LlmConfig {
            provider,
            api_key,
            base_url: trim_url(get("DEEPSEEK_BASE_URL").as_deref().unwrap_or(DEFAULT_DEEPSEEK_BASE_URL)),
            model: get("LLM_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_with_default("MAX_TOKENS", get("MAX_TOKENS").as_deref(), defaults.max_tokens),
            temperature,
            timeout_secs: parse("LLM_TIMEOUT_SECS", LLM_TIMEOUT_SECS),
        };

        let max_page_size =
            parse_with_default("MAX_PAGE_SIZE", get("MAX_PAGE_SIZE").as_deref(), MAX_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE);
        let default_page_size =
            parse_with_default("DEFAULT_PAGE_SIZE", get("DEFAULT_PAGE_SIZE").as_deref(), DEFAULT_PAGE_SIZE)
                .clamp(1, max_page_size);
        let pagination = PaginationConfig { default_page_size, max_page_size };

        let log_directive = log_directive(get("LOG_LEVEL").as_deref())?;

        Ok(Self { server, auth, database, llm, pagination, log_directive })
    }
}

fn require_prefix(var: &'static str, value: &str, prefix: &'static str) -> Result<(), ConfigError> {
    if value.starts_with(prefix) {
        Ok(())
    } else {
        Err(ConfigError::InvalidKeyPrefix { var, prefix })
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|o| !o.is_empty()).map(str::to_owned).collect()
}

fn database_url(get: &impl Fn(&str) -> Option<String>) -> Option<String> {
    if let Some(url) = get("DATABASE_URL") {
        return Some(url);
    }
    let host = get("DB_HOST")?;
    let user = get("DB_USER").unwrap_or_else(|| "postgres".to_owned());
    let password = get("DB_PASSWORD").unwrap_or_default();
    let port = get("DB_PORT").unwrap_or_else(|| "6543".to_owned());
    let name = get("DB_NAME").unwrap_or_else(|| "postgres".to_owned());
    Some(format!("postgresql://{user}:{password}@{host}:{port}/{name}"))
}

fn log_directive(level: Option<&str>) -> Result<&'static str, ConfigError> {
    match level.map(str::to_uppercase).as_deref() {
        None | Some("INFO") => Ok("info"),
        Some("DEBUG") => Ok("debug"),
        Some("WARNING" | "WARN") => Ok("warn"),
        Some("ERROR" | "CRITICAL") => Ok("error"),
        Some(other) => Err(ConfigError::InvalidChoice {
            var: "LOG_LEVEL",
            value: other.to_owned(),
            expected: "DEBUG, INFO, WARNING, ERROR, CRITICAL",
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        AppConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.environment, Environment::Development);
        assert_eq!(config.auth.clerk_api_url, "https://api.clerk.com");
        assert!(config.database.url.is_none());
        assert_eq!(config.llm.provider, LlmProvider::DeepSeek);
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.pagination.default_page_size, 50);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.server.cors_origins.len(), 3);
        assert_eq!(config.log_directive, "info");
    }

    #[test]
    fn rejects_clerk_key_with_wrong_prefix() {
        let err = config_from(&[("CLERK_SECRET_KEY", "pk_live_abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyPrefix { var: "CLERK_SECRET_KEY", .. }));
    }

    #[test]
    fn rejects_deepseek_key_with_wrong_prefix() {
        let err = config_from(&[("DEEPSEEK_API_KEY", "abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyPrefix { var: "DEEPSEEK_API_KEY", .. }));
    }

    #[test]
    fn rejects_unknown_environment_and_provider() {
        assert!(config_from(&[("ENVIRONMENT", "staging")]).is_err());
        assert!(config_from(&[("LLM_PROVIDER", "mistral")]).is_err());
        assert!(config_from(&[("LOG_LEVEL", "LOUD")]).is_err());
    }

    #[test]
    fn builds_database_url_from_components() {
        let config = config_from(&[("DB_HOST", "db.local"), ("DB_PASSWORD", "pw")]).unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgresql://postgres:pw@db.local:6543/postgres")
        );
        assert_eq!(config.database.redacted_url().as_deref(), Some("***@db.local:6543/postgres"));
    }

    #[test]
    fn database_url_wins_over_components() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://a:b@h/db"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://a:b@h/db"));
    }

    #[test]
    fn page_sizes_are_capped() {
        let config =
            config_from(&[("MAX_PAGE_SIZE", "500"), ("DEFAULT_PAGE_SIZE", "250")]).unwrap();
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.pagination.default_page_size, 100);
    }

    #[test]
    fn parses_cors_list_and_trims_urls() {
        let config = config_from(&[
            ("CORS_ORIGINS", " https://a.example , ,https://b.example"),
            ("DEEPSEEK_BASE_URL", "https://llm.example/"),
            ("ENVIRONMENT", "Production"),
        ])
        .unwrap();
        assert_eq!(config.server.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.llm.base_url, "https://llm.example");
        assert_eq!(config.auth.environment, Environment::Production);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = config_from(&[
            ("CLERK_SECRET_KEY", "sk_test_secret"),
            ("DEEPSEEK_API_KEY", "sk-secret"),
        ])
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk_test_secret"));
        assert!(!rendered.contains("sk-secret"));
    }
}
