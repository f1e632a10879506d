use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use zoskagram_core::{AppError, ErrorResponse};
use zoskagram_models::{Profile, UpsertProfileDto};

use crate::metrics::track_profile_saved;
use crate::middleware::auth::AuthUser;
use crate::modules::profiles::service::ProfileService;
use crate::state::AppState;

/// Get the caller's own profile.
///
/// Status codes follow the convention the profile oracle relies on:
/// 200 when the profile exists, 401 without a valid session, 404 when the
/// caller has not completed their profile yet.
#[utoipa::path(
    get,
    path = "/api/profily/ja",
    responses(
        (status = 200, description = "Caller's profile", body = Profile),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Caller has no profile yet", body = ErrorResponse),
    ),
    security(
        ("session_cookie" = [])
    ),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::find_own(&state.db, auth_user.identity())
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Profile not found")))?;

    Ok(Json(profile))
}

/// Create or update the caller's own profile (the profile-completion form).
#[utoipa::path(
    put,
    path = "/api/profily/ja",
    request_body = UpsertProfileDto,
    responses(
        (status = 200, description = "Profile saved", body = Profile),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 422, description = "Username contains invalid characters", body = ErrorResponse),
    ),
    security(
        ("session_cookie" = [])
    ),
    tag = "Profiles"
)]
#[instrument(skip(state, dto))]
pub async fn upsert_my_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<UpsertProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let dto = dto.normalized();
    dto.validate().map_err(AppError::bad_request)?;

    if !dto.has_valid_username_chars() {
        return Err(AppError::unprocessable(anyhow::anyhow!(
            "Username may only contain a-z, 0-9, '.' and '_'"
        )));
    }

    let profile = ProfileService::upsert_own(&state.db, auth_user.identity(), dto).await?;
    track_profile_saved();

    Ok(Json(profile))
}
