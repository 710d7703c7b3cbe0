use anyhow::{bail, Context, Result};

use crate::stylist::rules::StylistSettings;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base artificial "thinking" delay before a stylist reply is shown.
    pub response_delay_ms: u64,
    /// Upper bound of the random extra delay added on top of the base.
    pub response_jitter_ms: u64,
    pub max_product_recommendations: usize,
    pub typing_indicator: bool,
    /// Chat sessions untouched for this long are dropped.
    pub session_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            response_delay_ms: parse_env("STYLIST_RESPONSE_DELAY_MS", 1500)?,
            response_jitter_ms: parse_env("STYLIST_RESPONSE_JITTER_MS", 500)?,
            max_product_recommendations: parse_env("STYLIST_MAX_PRODUCTS", 2)?,
            typing_indicator: parse_env("STYLIST_TYPING_INDICATOR", true)?,
            session_idle_secs: parse_env("STYLIST_SESSION_IDLE_SECS", 1800)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Applies the settings-screen limits to the env-derived stylist settings.
    pub fn validate(&self) -> Result<()> {
        if let Err(reason) = StylistSettings::from_config(self).validate() {
            bail!("Invalid STYLIST_* configuration: {reason}");
        }
        if self.session_idle_secs == 0 {
            bail!("STYLIST_SESSION_IDLE_SECS must be greater than zero");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            response_delay_ms: 1500,
            response_jitter_ms: 500,
            max_product_recommendations: 2,
            typing_indicator: true,
            session_idle_secs: 1800,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
