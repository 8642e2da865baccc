use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Model used for one-word answers unless `GEMINI_MODEL` overrides it.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a single outbound AI call.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    /// Echoed verbatim in every response; `None` serializes as `null`.
    pub official_email: Option<String>,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Absent when `GEMINI_API_KEY` is unset or blank. The service still
    /// starts; only the `AI` operation fails.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }
}

impl BfhlConfig {
    pub fn load() -> Result<Self, AppError> {
        // Also reads .env, so everything below sees it.
        let common = core_config::Config::load()?;

        let timeout = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        };

        Ok(BfhlConfig {
            common,
            official_email: env::var("OFFICIAL_EMAIL").ok(),
            gemini: GeminiSettings {
                api_key: non_blank_env("GEMINI_API_KEY").map(Secret::new),
                model: non_blank_env("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: non_blank_env("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                timeout,
            },
        })
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// A zero timeout would fail every AI call before it is sent.
fn parse_timeout_secs(raw: &str) -> Result<Duration, AppError> {
    let secs = raw.trim().parse::<u64>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got {:?}: {}",
            raw,
            e
        ))
    })?;
    if secs == 0 {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TIMEOUT_SECS must be at least 1 second"
        )));
    }
    Ok(Duration::from_secs(secs))
}
