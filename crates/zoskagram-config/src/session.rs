use std::{env, fmt};

use crate::{ConfigError, parse_or};

pub const DEFAULT_COOKIE_NAME: &str = "zoskagram.session-token";

/// Session token settings.
///
/// # Environment Variables
///
/// - `SESSION_SECRET`: HMAC secret used to sign session tokens (required,
///   `NEXTAUTH_SECRET` is accepted as a fallback)
/// - `SESSION_COOKIE_NAME`: cookie carrying the token (default:
///   `zoskagram.session-token`)
/// - `SESSION_TOKEN_EXPIRY`: token lifetime in seconds (default: 30 days)
#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub token_expiry: i64,
}

impl SessionConfig {
    /// Loads the session configuration.
    ///
    /// A missing secret is an error rather than a default: starting with a
    /// well-known secret would silently accept forged tokens.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = ["SESSION_SECRET", "NEXTAUTH_SECRET"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let cookie_name = lookup("SESSION_COOKIE_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        Ok(Self {
            secret,
            cookie_name,
            token_expiry: parse_or(&lookup, "SESSION_TOKEN_EXPIRY", 2_592_000)?, // 30 days
        })
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}
