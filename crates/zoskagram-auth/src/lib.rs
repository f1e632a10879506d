//! # ZoškaGram Auth
//!
//! Session tokens and the authenticated identity for the ZoškaGram gate.
//!
//! - [`claims`]: JWT claim structure carried in the session cookie
//! - [`jwt`]: Token creation
//! - [`identity`]: The immutable [`Identity`] built from verified claims
//! - [`session`]: [`SessionVerifier`], which turns request headers into an
//!   optional identity
//!
//! # Example
//!
//! ```ignore
//! use zoskagram_auth::{SessionVerifier, create_session_token};
//! use zoskagram_config::SessionConfig;
//!
//! let config = SessionConfig::from_env()?;
//! let token = create_session_token("u1", "u1@gamca.sk", &config)?;
//!
//! let verifier = SessionVerifier::new(&config);
//! let identity = verifier.verify(request.headers()); // None when unauthenticated
//! ```

pub mod claims;
pub mod identity;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use claims::SessionClaims;
pub use identity::Identity;
pub use jwt::create_session_token;
pub use session::{Session, SessionVerifier};
