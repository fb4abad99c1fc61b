use serde::Deserialize;

pub const DEFAULT_LLM_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "mistralai/mistral-7b-instruct";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Outbound chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "finadvisor".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "finadvisor-users".into()),
            ttl_minutes: parse_var("JWT_TTL_MINUTES").unwrap_or(60 * 24),
        };
        let llm = LlmConfig {
            api_url: std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_LLM_API_URL.into()),
            api_key: std::env::var("OPENROUTER_API_KEY")?,
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.into()),
            timeout_secs: parse_var("LLM_TIMEOUT_SECS").unwrap_or(60),
        };
        let port = parse_var("APP_PORT")
            .or_else(|| parse_var("PORT"))
            .unwrap_or(5000);
        let cookie_secure = parse_var::<bool>("COOKIE_SECURE").unwrap_or_else(|| {
            std::env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false)
        });

        Ok(Self {
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            cookie_secure,
            jwt,
            llm,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
