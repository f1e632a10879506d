use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::gate::request_gate;
use crate::modules::profiles::init_profiles_router;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application.
///
/// Every route, the API and the front-end fallback alike, sits behind the
/// request gate. The front-end is served from `state.static_dir`; unknown
/// paths fall back to its `index.html` so client-side routes resolve.
pub fn init_router(state: AppState) -> Router {
    let app_shell = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join("index.html")));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .nest(
            "/api",
            Router::new().nest("/profily", init_profiles_router()),
        )
        .fallback_service(app_shell)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state.clone(), request_gate))
        .layer(middleware::from_fn(metrics_middleware))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
