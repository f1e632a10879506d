//! The request gate state machine.
//!
//! [`Gate::evaluate`] runs the checks in a fixed order and returns exactly one
//! [`GateDecision`]:
//!
//! 1. Public (but not auth-only) or exempt path: allow.
//! 2. No valid session: allow anonymous visitors on auth-only pages,
//!    otherwise redirect to login with `callbackUrl`.
//! 3. Signed in on an auth-only page: redirect to the landing page.
//! 4. Ask the profile oracle: allow if a profile exists, redirect to the
//!    profile-completion page if not, allow (fail open) if the oracle errors
//!    or times out.
//!
//! The gate holds no mutable state, so the same request with the same
//! session and the same profile state always yields the same decision.

use std::{sync::Arc, time::Duration};

use axum::http::{HeaderMap, Uri};

use zoskagram_auth::SessionVerifier;

use crate::gate::oracle::{OracleError, ProfileOracle};
use crate::gate::routes::{LANDING_PATH, LOGIN_PATH, PROFILE_SETUP_PATH, RouteTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    Public,
    Exempt,
    AnonymousOnAuthPage,
    ProfileComplete,
    /// The profile lookup failed; the request is let through unchecked.
    FailOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Login,
    Landing,
    ProfileSetup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow(AllowReason),
    Redirect { kind: RedirectKind, location: String },
}

impl GateDecision {
    pub fn location(&self) -> Option<&str> {
        match self {
            GateDecision::Allow(_) => None,
            GateDecision::Redirect { location, .. } => Some(location),
        }
    }

    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            GateDecision::Allow(AllowReason::Public) => "allow_public",
            GateDecision::Allow(AllowReason::Exempt) => "allow_exempt",
            GateDecision::Allow(AllowReason::AnonymousOnAuthPage) => "allow_anonymous_auth_page",
            GateDecision::Allow(AllowReason::ProfileComplete) => "allow_profile_complete",
            GateDecision::Allow(AllowReason::FailOpen) => "allow_fail_open",
            GateDecision::Redirect {
                kind: RedirectKind::Login,
                ..
            } => "redirect_login",
            GateDecision::Redirect {
                kind: RedirectKind::Landing,
                ..
            } => "redirect_landing",
            GateDecision::Redirect {
                kind: RedirectKind::ProfileSetup,
                ..
            } => "redirect_profile_setup",
        }
    }
}

pub struct Gate {
    routes: RouteTable,
    verifier: SessionVerifier,
    oracle: Arc<dyn ProfileOracle>,
    oracle_timeout: Duration,
}

impl Gate {
    pub fn new(
        routes: RouteTable,
        verifier: SessionVerifier,
        oracle: Arc<dyn ProfileOracle>,
        oracle_timeout: Duration,
    ) -> Self {
        Self {
            routes,
            verifier,
            oracle,
            oracle_timeout,
        }
    }

    pub async fn evaluate(&self, uri: &Uri, headers: &HeaderMap) -> GateDecision {
        let path = uri.path();
        let route = self.routes.classify(path);

        if route.is_public && !route.is_auth_only {
            return GateDecision::Allow(AllowReason::Public);
        }
        if route.is_exempt {
            return GateDecision::Allow(AllowReason::Exempt);
        }

        let Some(session) = self.verifier.authenticate(headers) else {
            if route.is_auth_only {
                return GateDecision::Allow(AllowReason::AnonymousOnAuthPage);
            }
            return GateDecision::Redirect {
                kind: RedirectKind::Login,
                location: with_param(LOGIN_PATH, "callbackUrl", &original_target(uri)),
            };
        };

        if route.is_auth_only {
            return GateDecision::Redirect {
                kind: RedirectKind::Landing,
                location: LANDING_PATH.to_string(),
            };
        }

        let lookup = tokio::time::timeout(self.oracle_timeout, self.oracle.has_profile(&session))
            .await
            .unwrap_or(Err(OracleError::Timeout(self.oracle_timeout)));

        match lookup {
            Ok(true) => GateDecision::Allow(AllowReason::ProfileComplete),
            Ok(false) => {
                let location = if path == PROFILE_SETUP_PATH {
                    PROFILE_SETUP_PATH.to_string()
                } else {
                    with_param(PROFILE_SETUP_PATH, "returnTo", &original_target(uri))
                };
                GateDecision::Redirect {
                    kind: RedirectKind::ProfileSetup,
                    location,
                }
            }
            Err(err) => {
                tracing::warn!(
                    subject_id = %session.identity().subject_id(),
                    path = %path,
                    oracle = self.oracle.name(),
                    error = %err,
                    "Profile lookup failed, letting request through"
                );
                GateDecision::Allow(AllowReason::FailOpen)
            }
        }
    }
}

/// Path plus query string of the original request.
fn original_target(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn with_param(base: &str, name: &str, value: &str) -> String {
    format!("{}?{}={}", base, name, urlencoding::encode(value))
}
