use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::metrics::track_gate_decision;
use crate::state::AppState;

/// Runs every request through the [`crate::gate::Gate`].
///
/// Allowed requests continue to the inner service untouched; everything else
/// becomes a `303 See Other` to the decided location. The gate never produces
/// an error response of its own.
///
/// ```rust,ignore
/// let app = Router::new()
///     .fallback_service(app_shell)
///     .layer(middleware::from_fn_with_state(state.clone(), request_gate));
/// ```
pub async fn request_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let decision = state.gate.evaluate(req.uri(), req.headers()).await;
    track_gate_decision(decision.label());

    match decision.location() {
        None => next.run(req).await,
        Some(location) => {
            debug!(path = %req.uri().path(), location = %location, "Gate redirect");
            Redirect::to(location).into_response()
        }
    }
}
