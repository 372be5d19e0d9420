use crate::app_config::{AppConfig, Environment, SettingsStoreKind};
use crate::ConfigError;

/// Default generative-text endpoint (Gemini-compatible REST API).
pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

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
/// Every variable has a default, so an empty environment yields a working
/// in-memory development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
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

    let env = parse_environment(&or_default("PROMODESK_ENV", "development"))?;

    let bind_addr = or_default("PROMODESK_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PROMODESK_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PROMODESK_LOG_LEVEL", "info");

    let database_url = optional("DATABASE_URL");
    let db_max_connections = parse_u32("PROMODESK_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("PROMODESK_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("PROMODESK_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "PROMODESK_DB_MIN_CONNECTIONS",
            format!("must not exceed PROMODESK_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }

    let fixtures_path = optional("PROMODESK_FIXTURES_PATH").map(PathBuf::from);

    let settings_store = match optional("PROMODESK_SETTINGS_STORE") {
        Some(raw) => parse_settings_store(&raw)?,
        None if database_url.is_some() => SettingsStoreKind::Postgres,
        None => SettingsStoreKind::Unavailable,
    };
    if settings_store == SettingsStoreKind::Postgres && database_url.is_none() {
        return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
    }

    let genai_api_key = optional("GENAI_API_KEY");
    let genai_base_url = or_default("PROMODESK_GENAI_BASE_URL", DEFAULT_GENAI_BASE_URL);
    url::Url::parse(&genai_base_url)
        .map_err(|e| invalid("PROMODESK_GENAI_BASE_URL", e.to_string()))?;
    let genai_model = or_default("PROMODESK_GENAI_MODEL", "gemini-2.0-flash");
    let genai_timeout_secs = parse_u64("PROMODESK_GENAI_TIMEOUT_SECS", "60")?;

    let page_size = parse_usize("PROMODESK_PAGE_SIZE", "10")?;
    if !(1..=crate::listing::MAX_PAGE_SIZE).contains(&page_size) {
        return Err(invalid(
            "PROMODESK_PAGE_SIZE",
            format!("must be between 1 and {}", crate::listing::MAX_PAGE_SIZE),
        ));
    }
    let list_loading_delay_ms = parse_u64("PROMODESK_LIST_LOADING_DELAY_MS", "500")?;

    let theme_path = PathBuf::from(or_default(
        "PROMODESK_THEME_PATH",
        "./.promodesk/preferences.json",
    ));

    let api_keys = optional("PROMODESK_API_KEYS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        fixtures_path,
        settings_store,
        genai_api_key,
        genai_base_url,
        genai_model,
        genai_timeout_secs,
        page_size,
        list_loading_delay_ms,
        theme_path,
        api_keys,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROMODESK_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

fn parse_settings_store(s: &str) -> Result<SettingsStoreKind, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "postgres" => Ok(SettingsStoreKind::Postgres),
        "memory" => Ok(SettingsStoreKind::Memory),
        "unavailable" => Ok(SettingsStoreKind::Unavailable),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROMODESK_SETTINGS_STORE".to_string(),
            reason: format!("expected postgres, memory, or unavailable; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
