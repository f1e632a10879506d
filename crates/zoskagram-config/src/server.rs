use std::{env, path::PathBuf};

/// Listener and static file settings.
///
/// - `BIND_ADDRESS`: default `0.0.0.0:3000`
/// - `STATIC_DIR`: built front-end served behind the gate, default `public`
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
        }
    }
}
