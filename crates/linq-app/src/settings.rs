use std::{net::SocketAddr, time::Duration};

use crate::retry::RetryPolicy;

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// LINQ_TOKEN_TTL_SECS must be a positive number of seconds.
pub fn parse_token_ttl(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .ok()
        .filter(|ttl| *ttl > 0)
        .ok_or_else(|| format!("Invalid LINQ_TOKEN_TTL_SECS: {raw}"))
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub token_secret: String,
    pub token_ttl_secs: i64,
    pub upstream_retry: RetryPolicy,
    pub protect_resources: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut bind_addr = lookup("LINQ_BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid LINQ_BIND_ADDR: {e}"))?;

        // Plain PORT wins over the port in LINQ_BIND_ADDR (PaaS convention).
        if let Some(port) = lookup("PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT: {e}"))?;
            bind_addr.set_port(port);
        }

        let log_filter = lookup("LINQ_LOG").unwrap_or_else(|| "info".to_string());

        let token_secret = lookup("LINQ_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "LINQ_TOKEN_SECRET is required".to_string())?;

        let token_ttl_secs = match lookup("LINQ_TOKEN_TTL_SECS") {
            Some(v) => parse_token_ttl(&v)?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let defaults = RetryPolicy::default();

        let max_retries = match lookup("LINQ_UPSTREAM_MAX_RETRIES") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| format!("Invalid LINQ_UPSTREAM_MAX_RETRIES (must be >= 1): {v}"))?,
            None => defaults.max_retries,
        };

        let initial_delay = match lookup("LINQ_UPSTREAM_INITIAL_DELAY_MS") {
            Some(v) => v
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| format!("Invalid LINQ_UPSTREAM_INITIAL_DELAY_MS: {e}"))?,
            None => defaults.initial_delay,
        };

        let protect_resources = match lookup("LINQ_PROTECT_RESOURCES").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => return Err(format!("Invalid LINQ_PROTECT_RESOURCES: {other}")),
        };

        Ok(Self {
            bind_addr,
            log_filter,
            token_secret,
            token_ttl_secs,
            upstream_retry: RetryPolicy {
                max_retries,
                initial_delay,
            },
            protect_resources,
        })
    }
}
