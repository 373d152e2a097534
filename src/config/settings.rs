//! Runtime settings from environment variables (`.env` honored).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Shape of the create/update/delete acknowledgements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStyle {
    /// `{"id": 7}` and `{"status": "SUCCESS", "code": 200}`.
    #[default]
    Structured,
    /// Bare JSON strings: `"organizationId : 7"` and `"SUCCESS : 200"`.
    Legacy,
}

impl FromStr for EnvelopeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" => Ok(EnvelopeStyle::Structured),
            "legacy" => Ok(EnvelopeStyle::Legacy),
            _ => Err(format!("expected structured or legacy, got {}", s)),
        }
    }
}

/// What update/delete report when no row carries the requested id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Zero affected rows is still a success.
    #[default]
    Lenient,
    /// Zero affected rows is `NotFound`.
    Strict,
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(MatchPolicy::Lenient),
            "strict" => Ok(MatchPolicy::Strict),
            _ => Err(format!("expected lenient or strict, got {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Server-side `statement_timeout` applied to every pooled connection. Zero disables it.
    pub statement_timeout: Duration,
    pub bind_addr: SocketAddr,
    /// Mount prefix for entity routes, e.g. `/api/v1`. Empty mounts at the root.
    pub api_prefix: String,
    pub envelope: EnvelopeStyle,
    pub match_policy: MatchPolicy,
    pub body_limit_bytes: usize,
    pub run_migrations: bool,
    pub create_database: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/emptytomb".into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            statement_timeout: Duration::from_millis(10_000),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            api_prefix: String::new(),
            envelope: EnvelopeStyle::default(),
            match_policy: MatchPolicy::default(),
            body_limit_bytes: 2 * 1024 * 1024,
            run_migrations: true,
            create_database: false,
        }
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidSetting {
        key,
        reason: e.to_string(),
    })
}

impl Settings {
    /// Load `.env` (if present) and then read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Settings::default();
        if let Some(v) = lookup("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            s.max_connections = parse("DB_MAX_CONNECTIONS", &v)?;
            if s.max_connections == 0 {
                return Err(ConfigError::InvalidSetting {
                    key: "DB_MAX_CONNECTIONS",
                    reason: "must be at least 1".into(),
                });
            }
        }
        if let Some(v) = lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            s.acquire_timeout = Duration::from_secs(parse("DB_ACQUIRE_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("DB_STATEMENT_TIMEOUT_MS") {
            s.statement_timeout = Duration::from_millis(parse("DB_STATEMENT_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("BIND_ADDR") {
            s.bind_addr = parse("BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("API_PREFIX") {
            let v = v.trim().trim_end_matches('/');
            if !v.is_empty() && !v.starts_with('/') {
                return Err(ConfigError::InvalidSetting {
                    key: "API_PREFIX",
                    reason: "must start with '/'".into(),
                });
            }
            s.api_prefix = v.to_string();
        }
        if let Some(v) = lookup("ENVELOPE_STYLE") {
            s.envelope = parse("ENVELOPE_STYLE", &v)?;
        }
        if let Some(v) = lookup("MATCH_POLICY") {
            s.match_policy = parse("MATCH_POLICY", &v)?;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            s.body_limit_bytes = parse("BODY_LIMIT_BYTES", &v)?;
        }
        if let Some(v) = lookup("RUN_MIGRATIONS") {
            s.run_migrations = parse("RUN_MIGRATIONS", &v)?;
        }
        if let Some(v) = lookup("CREATE_DATABASE") {
            s.create_database = parse("CREATE_DATABASE", &v)?;
        }
        Ok(s)
    }
}
