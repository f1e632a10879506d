use std::{env, str::FromStr, time::Duration};

use crate::{ConfigError, parse_or};

/// Which backend answers "does this identity have a profile?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OracleKind {
    /// Query the `profiles` table in-process.
    #[default]
    Sql,
    /// Call `GET {base_url}/api/profily/ja` with the caller's cookie.
    Http,
}

impl FromStr for OracleKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sql" | "db" | "database" => Ok(Self::Sql),
            "http" => Ok(Self::Http),
            _ => Err(()),
        }
    }
}

/// Request gate settings.
///
/// # Environment Variables
///
/// - `PROFILE_ORACLE`: `sql` or `http` (default: `sql`)
/// - `PROFILE_ORACLE_TIMEOUT_MS`: upper bound for one lookup (default: `250`)
/// - `APP_BASE_URL`: absolute base used by the HTTP oracle
///   (default: `http://localhost:3000`)
/// - `ASSET_PREFIX`: path prefix of framework assets, exempt from the
///   profile check (default: `/_next/`)
#[derive(Clone, Debug)]
pub struct GateConfig {
    pub oracle: OracleKind,
    pub oracle_timeout: Duration,
    pub base_url: String,
    pub asset_prefix: String,
}

impl GateConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms: u64 = parse_or(&lookup, "PROFILE_ORACLE_TIMEOUT_MS", 250)?;
        // A zero budget would time out every lookup and fail open on all of them.
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PROFILE_ORACLE_TIMEOUT_MS",
                value: timeout_ms.to_string(),
            });
        }

        Ok(Self {
            oracle: parse_or(&lookup, "PROFILE_ORACLE", OracleKind::Sql)?,
            oracle_timeout: Duration::from_millis(timeout_ms),
            base_url: lookup("APP_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            asset_prefix: lookup("ASSET_PREFIX")
                .map(|v| v.trim().to_string())
                .filter(|v| v.starts_with('/'))
                .unwrap_or_else(|| "/_next/".to_string()),
        })
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            oracle: OracleKind::Sql,
            oracle_timeout: Duration::from_millis(250),
            base_url: "http://localhost:3000".to_string(),
            asset_prefix: "/_next/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = GateConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.oracle, OracleKind::Sql);
        assert_eq!(config.oracle_timeout, Duration::from_millis(250));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.asset_prefix, "/_next/");
    }

    #[test]
    fn test_http_oracle_and_trailing_slash() {
        let config = GateConfig::from_lookup(|key| match key {
            "PROFILE_ORACLE" => Some("HTTP".to_string()),
            "APP_BASE_URL" => Some("https://zoskagram.sk/".to_string()),
            "PROFILE_ORACLE_TIMEOUT_MS" => Some("100".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.oracle, OracleKind::Http);
        assert_eq!(config.base_url, "https://zoskagram.sk");
        assert_eq!(config.oracle_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_unknown_oracle_rejected() {
        let err = GateConfig::from_lookup(|key| {
            (key == "PROFILE_ORACLE").then(|| "carrier-pigeon".to_string())
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "PROFILE_ORACLE",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = GateConfig::from_lookup(|key| {
            (key == "PROFILE_ORACLE_TIMEOUT_MS").then(|| "0".to_string())
        })
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PROFILE_ORACLE_TIMEOUT_MS",
                value: "0".to_string(),
            }
        );
    }
}
