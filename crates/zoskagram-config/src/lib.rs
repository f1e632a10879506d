//! # ZoškaGram Config
//!
//! Configuration types for the ZoškaGram gate, loaded from environment
//! variables once at startup and shared read-only afterwards.
//!
//! - [`session`]: Session token secret, cookie name and token lifetime
//! - [`gate`]: Profile oracle selection, timeout and base URL
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener address and static front-end directory
//!
//! Every `from_env` constructor has a `from_lookup` twin taking a key lookup
//! closure, so tests can feed values without touching the process
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use zoskagram_config::{CorsConfig, GateConfig, SessionConfig};
//!
//! let session_config = SessionConfig::from_env()?; // fails without SESSION_SECRET
//! let gate_config = GateConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod error;
pub mod gate;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use gate::{GateConfig, OracleKind};
pub use server::ServerConfig;
pub use session::SessionConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the key is unset or blank.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(value) if !value.is_empty() => {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        }
        _ => Ok(default),
    }
}
