use crate::app_config::AppConfig;
use crate::ConfigError;

/// Desktop browser UA sent with page fetches. Many storefronts serve a
/// stripped page (or a bot wall) to unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("SIZEWATCH_LOG_LEVEL", "warn");
    let user_agent = or_default("SIZEWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let fetch_timeout_secs = parse_u64("SIZEWATCH_FETCH_TIMEOUT_SECS", "20")?;
    let fetch_max_retries = parse_u32("SIZEWATCH_FETCH_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("SIZEWATCH_RETRY_BACKOFF_BASE_SECS", "1")?;
    let notify_timeout_secs = parse_u64("SIZEWATCH_NOTIFY_TIMEOUT_SECS", "10")?;
    let notify_username = lookup("SIZEWATCH_NOTIFY_USERNAME")
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIZEWATCH_FETCH_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    if notify_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIZEWATCH_NOTIFY_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        user_agent,
        fetch_timeout_secs,
        fetch_max_retries,
        retry_backoff_base_secs,
        notify_timeout_secs,
        notify_username,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
