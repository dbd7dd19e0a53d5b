use anyhow::Context;
use serde::Deserialize;

/// Lifetime of a session token: 100 hours.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 360_000;
pub const DEFAULT_MAX_EXTRA_FIELDS: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Prefix every skill split out of a comma separated string with a single
    /// space, the way older clients stored them.
    pub legacy_skill_padding: bool,
    pub max_extra_fields: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            legacy_skill_padding: true,
            max_extra_fields: DEFAULT_MAX_EXTRA_FIELDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub profile: ProfileConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            ttl_seconds: std::env::var("JWT_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS),
        };
        let profile = ProfileConfig {
            legacy_skill_padding: std::env::var("PROFILE_LEGACY_SKILL_PADDING")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            max_extra_fields: std::env::var("PROFILE_MAX_EXTRA_FIELDS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_EXTRA_FIELDS),
        };
        Ok(Self {
            database_url,
            jwt,
            profile,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
