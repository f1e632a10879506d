use axum::{extract::FromRequestParts, http::request::Parts};

use zoskagram_auth::Identity;
use zoskagram_core::AppError;

use crate::state::AppState;

/// Extractor that resolves the caller's identity from the session cookie.
///
/// API routes skip the page gate, so handlers that need a caller use this
/// extractor and answer `401` themselves instead of redirecting.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let verifier = &state.session_verifier;
        let session = verifier.authenticate(&parts.headers).ok_or_else(|| {
            if verifier.has_session_cookie(&parts.headers) {
                AppError::unauthorized("Invalid or expired session token")
            } else {
                AppError::unauthorized("Missing session cookie")
            }
        })?;

        Ok(AuthUser(session.into_identity()))
    }
}
