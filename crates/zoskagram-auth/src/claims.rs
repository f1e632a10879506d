//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in the session token set by the identity provider.
///
/// # Fields
///
/// - `sub`: Opaque subject identifier of the authenticated user
/// - `email`: User's email address
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject identifier
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
