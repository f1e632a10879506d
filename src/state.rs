use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

use zoskagram_auth::SessionVerifier;
use zoskagram_config::{CorsConfig, GateConfig, OracleKind, ServerConfig, SessionConfig};
use zoskagram_db::init_db_pool;

use crate::gate::{Gate, HttpProfileOracle, ProfileOracle, RouteTable, SqlProfileOracle};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub session_verifier: SessionVerifier,
    pub gate: Arc<Gate>,
    pub cors_config: CorsConfig,
    /// Directory holding the built front-end served behind the gate.
    pub static_dir: PathBuf,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Assembles the state from already-loaded parts.
    pub fn new(
        db: PgPool,
        session_config: &SessionConfig,
        gate_config: &GateConfig,
        oracle: Arc<dyn ProfileOracle>,
        cors_config: CorsConfig,
        static_dir: PathBuf,
    ) -> Self {
        let session_verifier = SessionVerifier::new(session_config);
        let gate = Gate::new(
            RouteTable::new(&gate_config.asset_prefix),
            session_verifier.clone(),
            oracle,
            gate_config.oracle_timeout,
        );

        Self {
            db,
            session_verifier,
            gate: Arc::new(gate),
            cors_config,
            static_dir,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }
}

/// Loads configuration and connects to the database.
///
/// # Errors
///
/// Fails when the session secret is missing, any setting is malformed, the
/// database is unreachable, or the HTTP oracle client can't be built. These
/// are all startup errors; nothing here is retried.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let session_config = SessionConfig::from_env().context("Invalid session configuration")?;
    let gate_config = GateConfig::from_env().context("Invalid gate configuration")?;
    let db = init_db_pool().await?;

    let oracle: Arc<dyn ProfileOracle> = match gate_config.oracle {
        OracleKind::Sql => Arc::new(SqlProfileOracle::new(db.clone())),
        OracleKind::Http => Arc::new(
            HttpProfileOracle::new(
                &gate_config.base_url,
                &session_config.cookie_name,
                gate_config.oracle_timeout,
            )
            .context("Failed to build HTTP client for profile oracle")?,
        ),
    };

    tracing::info!(
        oracle = oracle.name(),
        timeout_ms = gate_config.oracle_timeout.as_millis() as u64,
        cookie = %session_config.cookie_name,
        "Request gate configured"
    );

    Ok(AppState::new(
        db,
        &session_config,
        &gate_config,
        oracle,
        CorsConfig::from_env(),
        server_config.static_dir.clone(),
    ))
}
