use std::{env, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::warn;

use crate::{model::supervisor::Supervisor, store::TenantScope};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub session_dir: String,
    pub log_dir: String,

    pub store_timeout: Duration,
    pub board_idle: Duration,
    pub board_capacity: u64,
    /// Off means every supervisor sees every employee
    pub multi_tenant: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            access_token_ttl: parse_or(&lookup, "ACCESS_TOKEN_TTL", 43_200), // 12 hours

            rate_login_per_min: parse_or(&lookup, "RATE_LOGIN_PER_MIN", 60),
            rate_protected_per_min: parse_or(&lookup, "RATE_PROTECTED_PER_MIN", 1000),

            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            session_dir: lookup("SESSION_DIR").unwrap_or_else(|| "sessions".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),

            store_timeout: Duration::from_secs(parse_or(&lookup, "STORE_TIMEOUT_SECS", 10)),
            board_idle: Duration::from_secs(parse_or(&lookup, "BOARD_IDLE_SECS", 3600)),
            board_capacity: parse_or(&lookup, "BOARD_CAPACITY", 1000),
            multi_tenant: parse_or(&lookup, "MULTI_TENANT", true),
        })
    }

    pub fn tenant_scope(&self, supervisor: &Supervisor) -> TenantScope {
        self.multi_tenant.then_some(supervisor.id)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, ?default, "Malformed setting, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("SERVER_ADDR", "127.0.0.1:8080"),
        ("DATABASE_URL", "mysql://escala@localhost/escala"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn defaults_apply_when_optional_values_are_missing() {
        let config = config_from(&REQUIRED).unwrap();
        assert_eq!(config.access_token_ttl, 43_200);
        assert_eq!(config.rate_login_per_min, 60);
        assert_eq!(config.rate_protected_per_min, 1000);
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.session_dir, "sessions");
        assert_eq!(config.log_dir, "logs");
        assert_eq!(config.store_timeout, Duration::from_secs(10));
        assert_eq!(config.board_idle, Duration::from_secs(3600));
        assert_eq!(config.board_capacity, 1000);
        assert!(config.multi_tenant);
    }

    #[test]
    fn missing_required_value_is_an_error() {
        let err = config_from(&REQUIRED[..2]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("STORE_TIMEOUT_SECS", "soon"));
        pairs.push(("BOARD_CAPACITY", " 50 "));
        let config = config_from(&pairs).unwrap();
        assert_eq!(config.store_timeout, Duration::from_secs(10));
        assert_eq!(config.board_capacity, 50);
    }

    #[test]
    fn tenant_scope_follows_mode() {
        let supervisor = Supervisor {
            id: 7,
            email: "ana@escala.com".into(),
            name: "ana".into(),
        };

        let multi = config_from(&REQUIRED).unwrap();
        assert_eq!(multi.tenant_scope(&supervisor), Some(7));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MULTI_TENANT", "false"));
        let single = config_from(&pairs).unwrap();
        assert_eq!(single.tenant_scope(&supervisor), None);
    }
}
