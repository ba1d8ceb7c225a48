use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent ones fall back to their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MEMECART_ENV", "development"));
    let log_level = or_default("MEMECART_LOG_LEVEL", "info");
    let catalog_url = or_default("MEMECART_CATALOG_URL", "https://api.imgflip.com/get_memes");
    let storage_dir = PathBuf::from(or_default("MEMECART_STORAGE_DIR", "./.memecart"));

    let debounce_ms = parse_u64("MEMECART_DEBOUNCE_MS", "300")?;

    let page_size = parse_usize("MEMECART_PAGE_SIZE", "12")?;
    if page_size == 0 {
        return Err(invalid("MEMECART_PAGE_SIZE", "must be greater than 0".to_string()));
    }

    let unit_price = parse_u32("MEMECART_UNIT_PRICE", "25")?;
    if unit_price == 0 {
        return Err(invalid("MEMECART_UNIT_PRICE", "must be greater than 0".to_string()));
    }

    let request_timeout_secs = parse_u64("MEMECART_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MEMECART_USER_AGENT", "memecart/0.1 (catalog-browser)");
    let max_retries = parse_u32("MEMECART_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("MEMECART_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_url,
        storage_dir,
        debounce_ms,
        page_size,
        unit_price,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
