//! Runtime configuration
//!
//! Read once from the environment at startup. Missing or unparsable values
//! fall back to defaults with a log line.

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::lookup::debounce::DEFAULT_DEBOUNCE;
use crate::lookup::fdc::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    pub fdc_api_key: Option<String>,
    pub fdc_base_url: String,
    pub fdc_timeout: Duration,
    pub debounce: Duration,
}

impl Config {
    pub fn load() -> Self {
        let fdc_api_key = env::var("FDC_API_KEY").ok().filter(|k| !k.trim().is_empty());
        if fdc_api_key.is_none() {
            warn!("FDC_API_KEY not set, nutrition lookups will fail");
        }

        Self {
            port: try_load("LEANLOG_PORT", 3000),
            database_path: database_path(),
            fdc_api_key,
            fdc_base_url: env::var("LEANLOG_FDC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            fdc_timeout: Duration::from_secs(try_load("LEANLOG_FDC_TIMEOUT_SECS", 10)),
            debounce: Duration::from_millis(try_load(
                "LEANLOG_DEBOUNCE_MS",
                DEFAULT_DEBOUNCE.as_millis() as u64,
            )),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

/// Database path from the environment, or `data/leanlog.db` in the project root
fn database_path() -> PathBuf {
    env::var("LEANLOG_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
                    path = grandparent.to_path_buf();
                }
            }

            path.push("data");
            path.push("leanlog.db");
            path
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_on_garbage() {
        env::set_var("LEANLOG_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(try_load::<u16>("LEANLOG_TEST_GARBAGE_PORT", 3000), 3000);
        env::set_var("LEANLOG_TEST_GOOD_PORT", " 8080 ");
        assert_eq!(try_load::<u16>("LEANLOG_TEST_GOOD_PORT", 3000), 8080);
        assert_eq!(try_load::<u64>("LEANLOG_TEST_UNSET_VALUE", 300), 300);
    }

    #[test]
    fn test_default_database_file_name() {
        if env::var("LEANLOG_DATABASE_PATH").is_err() {
            assert!(database_path().ends_with("data/leanlog.db"));
        }
    }
}
