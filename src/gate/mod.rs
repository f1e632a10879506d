//! Request gating: who may see which page.
//!
//! - [`routes`]: Path classification (public, auth-only, exempt)
//! - [`oracle`]: "Does this caller have a profile?" backends
//! - [`decision`]: The ordered state machine producing one [`GateDecision`]
//!
//! The axum middleware wrapping [`Gate`] lives in
//! [`crate::middleware::gate`].

pub mod decision;
pub mod oracle;
pub mod routes;

pub use decision::{AllowReason, Gate, GateDecision, RedirectKind};
pub use oracle::{
    HttpProfileOracle, OracleError, ProfileOracle, SqlProfileOracle, StaticProfileOracle,
};
pub use routes::{RouteClassification, RouteTable};
