//! Middleware and extractors for request processing.
//!
//! - [`gate`]: The page gate, applied to every request (see [`crate::gate`])
//! - [`auth`]: [`auth::AuthUser`], the session extractor used by API handlers
//!
//! # Flow
//!
//! 1. The browser sends the session cookie set by the identity provider
//! 2. [`gate::request_gate`] decides between passing the request on and
//!    redirecting (login, profile completion, landing page)
//! 3. API handlers skip the gate and extract [`auth::AuthUser`] themselves,
//!    answering `401` when the session is missing or invalid

pub mod auth;
pub mod gate;
