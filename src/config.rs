/*
 * Responsibility
 * - 環境変数の読み込み (PORT, 公開鍵, issuer/audience, proxy header など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - gate 自体は環境変数を読まない。ここで読んだ鍵を constructor に渡す
 */
use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read {key}: {source}")]
    Read {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub auth_public_key_pem: String,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,

    // e.g. X-Forwarded-For when running behind a reverse proxy
    pub proxy_header: Option<HeaderName>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::from_env();

        let auth_public_key_pem = load_public_key_pem(
            std::env::var("AUTH_PUBLIC_KEY_PEM").ok(),
            std::env::var("AUTH_PUBLIC_KEY_FILE").ok(),
        )?;

        let auth_issuer = non_empty_var("AUTH_ISSUER");
        let auth_audience = non_empty_var("AUTH_AUDIENCE");

        let access_token_leeway_seconds = match std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Ok(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            Err(_) => 0,
        };

        let proxy_header = non_empty_var("PROXY_HEADER")
            .map(|v| HeaderName::try_from(v.trim()))
            .transpose()
            .map_err(|_| ConfigError::Invalid("PROXY_HEADER"))?;

        Ok(Self {
            addr,
            app_env,
            auth_public_key_pem,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            proxy_header,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Inline PEM wins over a file path. Inline values may carry literal `\n` sequences.
fn load_public_key_pem(
    inline: Option<String>,
    path: Option<String>,
) -> Result<String, ConfigError> {
    if let Some(pem) = inline.filter(|v| !v.trim().is_empty()) {
        return Ok(pem.replace("\\n", "\n"));
    }

    match path.filter(|v| !v.trim().is_empty()) {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            key: "AUTH_PUBLIC_KEY_FILE",
            source,
        }),
        None => Err(ConfigError::Missing("AUTH_PUBLIC_KEY_PEM or AUTH_PUBLIC_KEY_FILE")),
    }
}
