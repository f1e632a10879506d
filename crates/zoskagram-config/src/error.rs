use thiserror::Error;

/// Startup configuration failures. None of these are recoverable; `main`
/// reports them and exits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("session secret is not configured (set SESSION_SECRET)")]
    MissingSecret,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
