//! Startup configuration.
//!
//! Built once in `main` from command-line options and the environment, and
//! validated before any git command or network request runs.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::git::DenyList;
use crate::llm::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Default HTTP backend endpoint.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/generate";

/// Default timeout for the backend request (seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "STAGECOMMIT_TIMEOUT";
pub const BACKEND_ENV_VAR: &str = "STAGECOMMIT_BACKEND";
pub const URL_ENV_VAR: &str = "STAGECOMMIT_URL";
pub const MODEL_ENV_VAR: &str = "STAGECOMMIT_MODEL";
pub const GEMINI_URL_ENV_VAR: &str = "STAGECOMMIT_GEMINI_URL";
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Which generation strategy is wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Http,
    Gemini,
}

impl BackendKind {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(BackendKind::Http),
            "gemini" => Ok(BackendKind::Gemini),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

/// Settings for the selected backend.
#[derive(Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Http {
        url: String,
    },
    Gemini {
        base_url: String,
        model: String,
        api_key: String,
    },
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendConfig::Http { url } => f.debug_struct("Http").field("url", url).finish(),
            BackendConfig::Gemini {
                base_url, model, ..
            } => f
                .debug_struct("Gemini")
                .field("base_url", base_url)
                .field("model", model)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

/// Options taken from the command line. `None` falls back to the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub backend: Option<String>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub workdir: Option<PathBuf>,
    pub remote: Option<String>,
    pub no_filter: bool,
    pub deny_ext: Vec<String>,
    pub dry_run: bool,
    pub show_diff: bool,
}

/// Validated process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub workdir: PathBuf,
    pub backend: BackendConfig,
    pub timeout: Duration,
    pub remote: String,
    /// `None` disables deny-list filtering.
    pub deny_list: Option<DenyList>,
    pub dry_run: bool,
    pub show_diff: bool,
}

impl Config {
    /// Build the configuration from CLI options and the process environment.
    pub fn from_env(options: CliOptions) -> Result<Self, ConfigError> {
        Self::load(options, |key| env::var(key).ok())
    }

    /// Build the configuration with a custom environment lookup.
    pub fn load<F>(options: CliOptions, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = match options.backend.or_else(|| non_empty(BACKEND_ENV_VAR)) {
            Some(value) => BackendKind::parse(&value)?,
            None => BackendKind::Http,
        };

        let backend = match kind {
            BackendKind::Http => BackendConfig::Http {
                url: options
                    .url
                    .or_else(|| non_empty(URL_ENV_VAR))
                    .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            },
            BackendKind::Gemini => BackendConfig::Gemini {
                api_key: non_empty(API_KEY_ENV_VAR).ok_or(ConfigError::MissingApiKey)?,
                base_url: non_empty(GEMINI_URL_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                model: options
                    .model
                    .or_else(|| non_empty(MODEL_ENV_VAR))
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
        };

        let deny_list = if options.no_filter {
            None
        } else {
            Some(DenyList::default().with_extensions(&options.deny_ext))
        };

        Ok(Config {
            workdir: options.workdir.unwrap_or_else(|| PathBuf::from(".")),
            backend,
            timeout: parse_timeout(lookup(TIMEOUT_ENV_VAR)),
            remote: options.remote.unwrap_or_else(|| "origin".to_string()),
            deny_list,
            dry_run: options.dry_run,
            show_diff: options.show_diff,
        })
    }

    /// HTTP client with the configured request timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("stagecommit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)
    }
}

/// Parse the timeout override.
///
/// Logs a warning if the value is set but is not a whole number of seconds.
fn parse_timeout(value: Option<String>) -> Duration {
    match value {
        Some(v) if !v.is_empty() => match v.trim().parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 6] = [
        TIMEOUT_ENV_VAR,
        BACKEND_ENV_VAR,
        URL_ENV_VAR,
        MODEL_ENV_VAR,
        GEMINI_URL_ENV_VAR,
        API_KEY_ENV_VAR,
    ];

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::load(CliOptions::default(), no_env).unwrap();
        assert_eq!(
            config.backend,
            BackendConfig::Http {
                url: DEFAULT_BACKEND_URL.to_string()
            }
        );
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.remote, "origin");
        assert_eq!(config.workdir, PathBuf::from("."));
        assert!(config.deny_list.is_some());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_gemini_without_key_fails_fast() {
        let options = CliOptions {
            backend: Some("gemini".to_string()),
            ..Default::default()
        };
        let result = Config::load(options, no_env);
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_gemini_with_blank_key_fails_fast() {
        let options = CliOptions {
            backend: Some("gemini".to_string()),
            ..Default::default()
        };
        let result = Config::load(options, |k| (k == API_KEY_ENV_VAR).then(|| "  ".to_string()));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_http_backend_does_not_need_key() {
        let options = CliOptions {
            backend: Some("HTTP".to_string()),
            ..Default::default()
        };
        assert!(Config::load(options, no_env).is_ok());
    }

    #[test]
    fn test_unknown_backend() {
        let options = CliOptions {
            backend: Some("carrier-pigeon".to_string()),
            ..Default::default()
        };
        let result = Config::load(options, no_env);
        assert!(matches!(result, Err(ConfigError::UnknownBackend(b)) if b == "carrier-pigeon"));
    }

    #[test]
    fn test_cli_flag_wins_over_env() {
        temp_env::with_vars(
            [
                (URL_ENV_VAR, Some("http://env.test/generate")),
                (BACKEND_ENV_VAR, Some("gemini")),
            ],
            || {
                let options = CliOptions {
                    backend: Some("http".to_string()),
                    url: Some("http://flag.test/generate".to_string()),
                    ..Default::default()
                };
                let config = Config::from_env(options).unwrap();
                assert_eq!(
                    config.backend,
                    BackendConfig::Http {
                        url: "http://flag.test/generate".to_string()
                    }
                );
            },
        );
    }

    #[test]
    fn test_gemini_from_env() {
        temp_env::with_vars(
            [
                (BACKEND_ENV_VAR, Some("gemini")),
                (API_KEY_ENV_VAR, Some("test-key")),
                (MODEL_ENV_VAR, Some("gemini-1.5-pro")),
                (GEMINI_URL_ENV_VAR, None),
                (URL_ENV_VAR, None),
                (TIMEOUT_ENV_VAR, Some("5")),
            ],
            || {
                let config = Config::from_env(CliOptions::default()).unwrap();
                assert_eq!(
                    config.backend,
                    BackendConfig::Gemini {
                        base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                        model: "gemini-1.5-pro".to_string(),
                        api_key: "test-key".to_string(),
                    }
                );
                assert_eq!(config.timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_from_env_with_clean_environment() {
        temp_env::with_vars_unset(ALL_VARS, || {
            let config = Config::from_env(CliOptions::default()).unwrap();
            assert!(matches!(config.backend, BackendConfig::Http { .. }));
        });
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let backend = BackendConfig::Gemini {
            base_url: "https://x".to_string(),
            model: "m".to_string(),
            api_key: "super-secret".to_string(),
        };
        let debug = format!("{:?}", backend);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_no_filter_disables_deny_list() {
        let options = CliOptions {
            no_filter: true,
            ..Default::default()
        };
        let config = Config::load(options, no_env).unwrap();
        assert!(config.deny_list.is_none());
    }

    #[test]
    fn test_extra_denied_extensions() {
        let options = CliOptions {
            deny_ext: vec!["lock".to_string()],
            ..Default::default()
        };
        let config = Config::load(options, no_env).unwrap();
        let deny = config.deny_list.unwrap();
        assert!(deny.is_denied("Cargo.lock"));
        assert!(deny.is_denied("logo.png"));
    }

    #[test]
    fn test_parse_timeout_default() {
        assert_eq!(parse_timeout(None), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_parse_timeout_invalid_uses_default() {
        assert_eq!(
            parse_timeout(Some("not_a_number".to_string())),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            parse_timeout(Some(String::new())),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_parse_timeout_value() {
        assert_eq!(parse_timeout(Some("120".to_string())), Duration::from_secs(120));
    }
}
