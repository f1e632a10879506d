use crate::claims::SessionClaims;

/// An authenticated principal.
///
/// In the request path this is built exactly once, by [`crate::SessionVerifier`],
/// from claims that already passed signature and expiry checks. Nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject_id: String,
    email: String,
}

impl Identity {
    pub(crate) fn from_claims(claims: SessionClaims) -> Option<Self> {
        if claims.sub.trim().is_empty() {
            return None;
        }

        Some(Self {
            subject_id: claims.sub,
            email: claims.email,
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Builds an identity directly, for callers that authenticated the user
    /// some other way (the token minting side, tests).
    pub fn new(subject_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
        }
    }
}
