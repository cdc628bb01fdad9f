//! Service-root resolution for the Launchpad client.
//!
//! The tool is a one-shot generator with no persisted state, so configuration
//! comes from the command line and the environment only, resolved with
//! flag > env > default precedence.

use anyhow::{Result, bail};
use std::time::Duration;

/// Production Launchpad web service root (the `devel` API version, which is
/// what the series collection is published under).
pub const PRODUCTION_SERVICE_ROOT: &str = "https://api.launchpad.net/devel";

/// Staging Launchpad web service root.
pub const STAGING_SERVICE_ROOT: &str = "https://api.staging.launchpad.net/devel";

/// QA staging Launchpad web service root.
pub const QASTAGING_SERVICE_ROOT: &str = "https://api.qastaging.launchpad.net/devel";

/// Environment variable name for overriding the service root.
pub const SERVICE_ROOT_ENV_VAR: &str = "LAUNCHPAD_SERVICE_ROOT";

/// Connect/read timeout applied to every Launchpad request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Result of resolving the effective service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedServiceRoot {
    /// The resolved web service root URL, without a trailing slash.
    pub url: String,
    /// Whether the resolved URL uses a non-HTTPS scheme (user should be warned).
    pub is_non_https: bool,
}

/// Resolve the effective service root using layered precedence.
///
/// Priority (highest wins):
/// 1. `cli_override` — the `--service-root` flag value for this invocation
/// 2. `LAUNCHPAD_SERVICE_ROOT` environment variable
/// 3. The `production` alias
///
/// Empty or whitespace-only values at any layer are treated as absent and
/// fall through to the next layer. Each layer accepts either a known alias
/// (`production`, `staging`, `qastaging`) or a literal `http(s)://` URL.
pub fn resolve_service_root(cli_override: Option<&str>) -> Result<ResolvedServiceRoot> {
    resolve_service_root_with_env(cli_override, std::env::var(SERVICE_ROOT_ENV_VAR).ok())
}

/// Internal resolver that accepts the env var value as a parameter for testability.
fn resolve_service_root_with_env(
    cli_override: Option<&str>,
    env_value: Option<String>,
) -> Result<ResolvedServiceRoot> {
    let raw = non_empty_trimmed(cli_override.map(|s| s.to_string()))
        .or_else(|| non_empty_trimmed(env_value))
        .unwrap_or_else(|| "production".to_string());

    let url = lookup_service_root(&raw)?;
    let is_non_https = !url.starts_with("https://");
    Ok(ResolvedServiceRoot { url, is_non_https })
}

/// Map a service root alias to its URL, or pass a literal URL through.
///
/// Literal URLs are stripped of trailing slashes to prevent double-slash
/// issues when joining resource paths.
pub fn lookup_service_root(alias_or_url: &str) -> Result<String> {
    match alias_or_url {
        "production" => Ok(PRODUCTION_SERVICE_ROOT.to_string()),
        "staging" => Ok(STAGING_SERVICE_ROOT.to_string()),
        "qastaging" => Ok(QASTAGING_SERVICE_ROOT.to_string()),
        other if other.starts_with("http://") || other.starts_with("https://") => {
            Ok(other.trim_end_matches('/').to_string())
        }
        other => bail!(
            "Unknown service root '{other}'. Expected production, staging, qastaging, or an http(s) URL"
        ),
    }
}

/// Treat empty and whitespace-only values as absent.
fn non_empty_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper: save/restore an env var around a closure.
    struct EnvGuard {
        key: String,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str) -> Self {
            Self {
                key: key.to_string(),
                original: std::env::var(key).ok(),
            }
        }

        fn set(&self, value: &str) {
            unsafe { std::env::set_var(&self.key, value) };
        }

        fn remove(&self) {
            unsafe { std::env::remove_var(&self.key) };
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(v) => unsafe { std::env::set_var(&self.key, v) },
                None => unsafe { std::env::remove_var(&self.key) },
            }
        }
    }

    // -----------------------------------------------------------------------
    // Alias lookup
    // -----------------------------------------------------------------------

    #[test]
    fn test_lookup_production_alias() {
        assert_eq!(
            lookup_service_root("production").unwrap(),
            "https://api.launchpad.net/devel"
        );
    }

    #[test]
    fn test_lookup_staging_alias() {
        assert_eq!(
            lookup_service_root("staging").unwrap(),
            "https://api.staging.launchpad.net/devel"
        );
    }

    #[test]
    fn test_lookup_qastaging_alias() {
        assert_eq!(
            lookup_service_root("qastaging").unwrap(),
            "https://api.qastaging.launchpad.net/devel"
        );
    }

    #[test]
    fn test_lookup_literal_url_passes_through() {
        assert_eq!(
            lookup_service_root("http://127.0.0.1:8999").unwrap(),
            "http://127.0.0.1:8999"
        );
    }

    #[test]
    fn test_lookup_literal_url_strips_trailing_slash() {
        assert_eq!(
            lookup_service_root("https://api.example.com/devel///").unwrap(),
            "https://api.example.com/devel"
        );
    }

    #[test]
    fn test_lookup_unknown_alias_is_rejected() {
        let err = lookup_service_root("dogfood").unwrap_err();
        assert!(
            err.to_string().contains("Unknown service root"),
            "unexpected error: {err}"
        );
    }

    // -----------------------------------------------------------------------
    // Layered resolution
    // -----------------------------------------------------------------------

    #[test]
    fn test_resolve_defaults_to_production() {
        let resolved = resolve_service_root_with_env(None, None).unwrap();
        assert_eq!(resolved.url, PRODUCTION_SERVICE_ROOT);
        assert!(!resolved.is_non_https);
    }

    #[test]
    fn test_resolve_flag_wins_over_env() {
        let resolved =
            resolve_service_root_with_env(Some("staging"), Some("qastaging".to_string())).unwrap();
        assert_eq!(resolved.url, STAGING_SERVICE_ROOT);
    }

    #[test]
    fn test_resolve_env_wins_over_default() {
        let resolved =
            resolve_service_root_with_env(None, Some("qastaging".to_string())).unwrap();
        assert_eq!(resolved.url, QASTAGING_SERVICE_ROOT);
    }

    #[test]
    fn test_resolve_empty_flag_falls_through_to_env() {
        let resolved =
            resolve_service_root_with_env(Some("   "), Some("staging".to_string())).unwrap();
        assert_eq!(resolved.url, STAGING_SERVICE_ROOT);
    }

    #[test]
    fn test_resolve_empty_env_falls_through_to_default() {
        let resolved = resolve_service_root_with_env(None, Some("".to_string())).unwrap();
        assert_eq!(resolved.url, PRODUCTION_SERVICE_ROOT);
    }

    #[test]
    fn test_resolve_flags_non_https_roots() {
        let resolved =
            resolve_service_root_with_env(Some("http://127.0.0.1:1234"), None).unwrap();
        assert!(resolved.is_non_https);
    }

    #[test]
    #[serial]
    fn test_resolve_reads_env_var() {
        let guard = EnvGuard::new(SERVICE_ROOT_ENV_VAR);
        guard.set("staging");
        let resolved = resolve_service_root(None).unwrap();
        assert_eq!(resolved.url, STAGING_SERVICE_ROOT);
    }

    #[test]
    #[serial]
    fn test_resolve_ignores_unset_env_var() {
        let guard = EnvGuard::new(SERVICE_ROOT_ENV_VAR);
        guard.remove();
        let resolved = resolve_service_root(None).unwrap();
        assert_eq!(resolved.url, PRODUCTION_SERVICE_ROOT);
    }
}
