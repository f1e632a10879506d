//! Session token creation.
//!
//! Tokens are HS256 JWTs signed with [`SessionConfig::secret`]. Verification
//! lives in [`crate::session::SessionVerifier`], which checks the signature
//! and expiry, requires a `sub` claim and rejects blank subjects.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, Validation, encode};

use zoskagram_config::SessionConfig;
use zoskagram_core::AppError;

use crate::claims::SessionClaims;

/// Validation rules shared by every session token check.
pub(crate) fn session_validation() -> Validation {
    let mut validation = Validation::default();
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Creates a signed session token for `subject_id`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_session_token(
    subject_id: &str,
    email: &str,
    session_config: &SessionConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + session_config.token_expiry.max(0) as usize;

    let claims = SessionClaims {
        sub: subject_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(session_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create session token: {}", e)))
}
