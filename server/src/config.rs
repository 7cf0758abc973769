use anyhow::{Context, Result, anyhow};
use chrono::{TimeDelta, Utc};
use platform_authn::{AuthConfig, DEFAULT_TOKEN_TTL_MINUTES};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub auth: AuthConfig,
    /// Guard the resource routes with a bearer token.
    pub auth_required: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET missing")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        let token_ttl_minutes = match std::env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => parse_token_ttl(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            auth: AuthConfig {
                jwt_secret,
                token_ttl_minutes,
            },
            auth_required: env_bool("AUTH_REQUIRED", true),
            cors_allowed_origins,
        })
    }
}

/// Positive minutes that still fit a token expiry timestamp.
fn parse_token_ttl(raw: &str) -> Result<i64> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid TOKEN_TTL_MINUTES {raw:?}"))?;
    let fits = minutes > 0
        && TimeDelta::try_minutes(minutes)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .is_some();
    if !fits {
        return Err(anyhow!("TOKEN_TTL_MINUTES {minutes} is out of range"));
    }
    Ok(minutes)
}

fn env_bool(var: &str, default: bool) -> bool {
    std::env::var(var)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_accepts_positive_minutes() {
        assert_eq!(parse_token_ttl("60").unwrap(), 60);
        assert_eq!(parse_token_ttl(" 1440 ").unwrap(), 1440);
    }

    #[test]
    fn token_ttl_rejects_non_numbers() {
        assert!(parse_token_ttl("an hour").is_err());
        assert!(parse_token_ttl("").is_err());
    }

    #[test]
    fn token_ttl_rejects_values_chrono_cannot_represent() {
        for raw in ["0", "-5", "9223372036854775807", "-9223372036854775808"] {
            let err = parse_token_ttl(raw).unwrap_err();
            assert!(err.to_string().contains("out of range"), "{raw}: {err}");
        }
    }
}
