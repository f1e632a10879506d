//! Profile-completeness oracles.
//!
//! An oracle answers one question for the gate: does the signed-in caller
//! already have a profile? It only ever receives a [`Session`] produced by
//! the session verifier, never an identifier taken from the request, so it
//! can't be used to probe other users' profiles.

use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use reqwest::{StatusCode, header::COOKIE, redirect::Policy};
use sqlx::PgPool;
use thiserror::Error;

use zoskagram_auth::Session;

use crate::modules::profiles::ProfileService;

/// Path of the profile endpoint the HTTP oracle calls.
pub const OWN_PROFILE_ENDPOINT: &str = "/api/profily/ja";

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("profile lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("profile lookup failed: {0}")]
    Lookup(#[source] anyhow::Error),

    #[error("profile endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("profile endpoint rejected the session")]
    Unauthenticated,

    #[error("profile endpoint answered with unexpected status {0}")]
    UnexpectedStatus(u16),
}

#[async_trait]
pub trait ProfileOracle: Send + Sync {
    /// `Ok(true)` if the caller has a profile, `Ok(false)` if not, `Err` if
    /// the answer couldn't be determined.
    async fn has_profile(&self, session: &Session) -> Result<bool, OracleError>;

    /// Short backend name used in logs and metrics.
    fn name(&self) -> &'static str;
}

/// Looks the profile up directly in the `profiles` table.
#[derive(Debug, Clone)]
pub struct SqlProfileOracle {
    db: PgPool,
}

impl SqlProfileOracle {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileOracle for SqlProfileOracle {
    async fn has_profile(&self, session: &Session) -> Result<bool, OracleError> {
        ProfileService::exists(&self.db, session.identity())
            .await
            .map_err(|e| OracleError::Lookup(e.error))
    }

    fn name(&self) -> &'static str {
        "sql"
    }
}

/// Asks the profile endpoint over HTTP, forwarding the caller's own session
/// cookie. Status convention: 200 = exists, 404 = missing, anything else is
/// a failure.
#[derive(Debug, Clone)]
pub struct HttpProfileOracle {
    client: reqwest::Client,
    endpoint: String,
    cookie_name: String,
}

impl HttpProfileOracle {
    /// Builds the oracle. Redirects are not followed: a redirect from the
    /// profile endpoint would mean a misrouted request, not an answer.
    pub fn new(
        base_url: &str,
        cookie_name: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), OWN_PROFILE_ENDPOINT),
            cookie_name: cookie_name.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProfileOracle for HttpProfileOracle {
    async fn has_profile(&self, session: &Session) -> Result<bool, OracleError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(COOKIE, format!("{}={}", self.cookie_name, session.token()))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            StatusCode::UNAUTHORIZED => Err(OracleError::Unauthenticated),
            other => Err(OracleError::UnexpectedStatus(other.as_u16())),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Fixed set of subject ids that have a profile. Used in tests and for
/// running the gate without a database.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileOracle {
    owners: HashSet<String>,
}

impl StaticProfileOracle {
    pub fn new<I, S>(owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owners: owners.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ProfileOracle for StaticProfileOracle {
    async fn has_profile(&self, session: &Session) -> Result<bool, OracleError> {
        Ok(self.owners.contains(session.identity().subject_id()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoskagram_auth::Identity;

    fn session(subject_id: &str) -> Session {
        Session::new(
            Identity::new(subject_id, format!("{}@gamca.sk", subject_id)),
            "token",
        )
    }

    #[tokio::test]
    async fn test_static_oracle() {
        let oracle = StaticProfileOracle::new(["u2"]);
        assert!(oracle.has_profile(&session("u2")).await.unwrap());
        assert!(!oracle.has_profile(&session("u1")).await.unwrap());
    }

    #[test]
    fn test_http_oracle_endpoint() {
        let oracle = HttpProfileOracle::new(
            "http://localhost:3000/",
            "zoskagram.session-token",
            Duration::from_millis(250),
        )
        .unwrap();
        assert_eq!(oracle.endpoint(), "http://localhost:3000/api/profily/ja");
    }

    #[tokio::test]
    async fn test_http_oracle_unreachable_is_error() {
        // Port 9 (discard) is not expected to be listening.
        let oracle = HttpProfileOracle::new(
            "http://127.0.0.1:9",
            "zoskagram.session-token",
            Duration::from_millis(250),
        )
        .unwrap();

        let result = oracle.has_profile(&session("u1")).await;
        assert!(matches!(result, Err(OracleError::Transport(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OracleError::UnexpectedStatus(500).to_string(),
            "profile endpoint answered with unexpected status 500"
        );
        assert_eq!(
            OracleError::Timeout(Duration::from_millis(250)).to_string(),
            "profile lookup timed out after 250ms"
        );
    }
}
