use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use zoskagram_config::session::DEFAULT_COOKIE_NAME;
use zoskagram_core::ErrorResponse;
use zoskagram_models::{Profile, UpsertProfileDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::profiles::controller::get_my_profile,
        crate::modules::profiles::controller::upsert_my_profile,
    ),
    components(schemas(Profile, UpsertProfileDto, ErrorResponse)),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Profiles", description = "The caller's own profile")
    ),
    info(
        title = "ZoškaGram API",
        description = "Profile endpoints behind the ZoškaGram request gate"
    )
)]
pub struct ApiDoc;

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_COOKIE_NAME))),
            );
        }
    }
}
