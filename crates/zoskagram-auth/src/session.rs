//! Session cookie verification.
//!
//! [`SessionVerifier`] is built once at startup from [`SessionConfig`] and
//! shared by every request. Verification never fails loudly: a missing,
//! malformed, expired or forged token simply means "no identity".

use std::fmt;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};

use zoskagram_config::SessionConfig;
use zoskagram_core::AppError;

use crate::claims::SessionClaims;
use crate::identity::Identity;
use crate::jwt::session_validation;

/// Browsers only send `__Secure-` prefixed cookies over HTTPS, so production
/// deployments carry the token under the prefixed name.
const SECURE_PREFIX: &str = "__Secure-";

/// A verified identity together with the token it was read from.
///
/// The token is kept so that collaborators acting on the caller's behalf
/// (the HTTP profile oracle) can forward it unchanged.
#[derive(Clone)]
pub struct Session {
    identity: Identity,
    token: String,
}

impl Session {
    pub fn new(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity,
            token: token.into(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn into_identity(self) -> Identity {
        self.identity
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct SessionVerifier {
    cookie_name: String,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(session_config: &SessionConfig) -> Self {
        Self {
            cookie_name: session_config.cookie_name.clone(),
            decoding_key: DecodingKey::from_secret(session_config.secret.as_bytes()),
            validation: session_validation(),
        }
    }

    /// Raw session tokens from the `Cookie` header, the `__Secure-` variant
    /// first. Empty values are skipped.
    fn session_tokens(&self, headers: &HeaderMap) -> Vec<String> {
        let jar = CookieJar::from_headers(headers);
        let secure_name = format!("{}{}", SECURE_PREFIX, self.cookie_name);

        [jar.get(&secure_name), jar.get(&self.cookie_name)]
            .into_iter()
            .flatten()
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Whether the request carries any session cookie at all, valid or not.
    pub fn has_session_cookie(&self, headers: &HeaderMap) -> bool {
        !self.session_tokens(headers).is_empty()
    }

    /// Validates `token` and builds the identity it carries.
    fn verify_token(&self, token: &str) -> Result<Identity, AppError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AppError::unauthorized("Invalid or expired session token")
            })?;

        Identity::from_claims(claims)
            .ok_or_else(|| AppError::unauthorized("Session token has no subject"))
    }

    /// Resolves the request's session, or `None` when the request is
    /// unauthenticated for any reason.
    ///
    /// A stale `__Secure-` cookie does not hide a valid plain one: each
    /// candidate is tried in order and the first that verifies wins.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Session> {
        self.session_tokens(headers).into_iter().find_map(|token| {
            let identity = self.verify_token(&token).ok()?;
            Some(Session { identity, token })
        })
    }

    /// Like [`Self::authenticate`], keeping only the identity.
    pub fn verify(&self, headers: &HeaderMap) -> Option<Identity> {
        self.authenticate(headers).map(Session::into_identity)
    }
}

impl fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}
