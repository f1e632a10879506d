mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{db_state, session_cookie, unique_subject};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use zoskagram::router::init_router;

async fn get_profile(app: axum::Router, cookie: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri("/api/profily/ja");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, body)
}

async fn put_profile(
    app: axum::Router,
    cookie: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/profily/ja")
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_requires_session(pool: PgPool) {
    let app = init_router(db_state(pool));

    let (status, body) = get_profile(app, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_is_404_before_setup(pool: PgPool) {
    let app = init_router(db_state(pool));
    let cookie = session_cookie(&unique_subject());

    let (status, _) = get_profile(app, Some(&cookie)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_then_get_profile(pool: PgPool) {
    let state = db_state(pool);
    let subject = unique_subject();
    let cookie = session_cookie(&subject);

    let (status, body) = put_profile(
        init_router(state.clone()),
        &cookie,
        json!({ "username": "  Jana.Novakova ", "full_name": "Jana Nováková", "bio": "  " }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner_id"], subject.as_str());
    assert_eq!(body["username"], "jana.novakova");
    assert!(body["bio"].is_null());

    let (status, body) = get_profile(init_router(state), Some(&cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Jana Nováková");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_keeps_single_profile(pool: PgPool) {
    let state = db_state(pool.clone());
    let subject = unique_subject();
    let cookie = session_cookie(&subject);

    let (status, _) = put_profile(
        init_router(state.clone()),
        &cookie,
        json!({ "username": "peter_k", "full_name": "Peter K" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = put_profile(
        init_router(state),
        &cookie,
        json!({ "username": "peter_k", "full_name": "Peter Kováč", "bio": "3.A" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Peter Kováč");
    assert_eq!(body["bio"], "3.A");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE owner_id = $1")
        .bind(&subject)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_username_taken_is_conflict(pool: PgPool) {
    let state = db_state(pool);

    let (status, _) = put_profile(
        init_router(state.clone()),
        &session_cookie(&unique_subject()),
        json!({ "username": "zoska", "full_name": "First" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = put_profile(
        init_router(state),
        &session_cookie(&unique_subject()),
        json!({ "username": "Zoska", "full_name": "Second" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("taken"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_profile_is_rejected(pool: PgPool) {
    let state = db_state(pool);
    let cookie = session_cookie(&unique_subject());

    let (status, _) = put_profile(
        init_router(state.clone()),
        &cookie,
        json!({ "username": "ab", "full_name": "Too Short" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_profile(
        init_router(state),
        &cookie,
        json!({ "username": "bad name!", "full_name": "Spaces" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_saved_profile_opens_the_gate(pool: PgPool) {
    let state = db_state(pool);
    let cookie = session_cookie(&unique_subject());

    let request = |uri: &str| {
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap()
    };

    let response = init_router(state.clone())
        .oneshot(request("/prispevky"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (status, _) = put_profile(
        init_router(state.clone()),
        &cookie,
        json!({ "username": "new_student", "full_name": "New Student" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response = init_router(state)
        .oneshot(request("/prispevky"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
