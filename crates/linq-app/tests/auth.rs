use axum::http::{Method, StatusCode};
use serde_json::json;

use linq_core::crypto::token::{sign_token_at, verify_token};

mod common;
use common::{app, default_state, get, post, send, SECRET};

#[tokio::test]
async fn login_issues_verifiable_token() {
    let res = post(&app(), "/login", json!({ "username": "ada" })).await;

    assert_eq!(res.status, StatusCode::OK);
    let token = res.json()["token"].as_str().unwrap().to_string();
    let claims = verify_token(SECRET, &token).unwrap();
    assert_eq!(claims.name, "ada");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn login_without_username_uses_default() {
    let app = app();

    for body in [Some(json!({})), Some(json!({ "username": "" })), None] {
        let res = send(&app, Method::POST, "/login", body, None).await;
        assert_eq!(res.status, StatusCode::OK);

        let token = res.json()["token"].as_str().unwrap().to_string();
        assert_eq!(verify_token(SECRET, &token).unwrap().name, "defaultUser");
    }
}

#[tokio::test]
async fn protected_requires_token() {
    let res = get(&app(), "/protected").await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json(), json!({ "message": "No token provided" }));
}

#[tokio::test]
async fn protected_rejects_bad_and_expired_tokens() {
    let app = app();
    let expired = sign_token_at(SECRET, "ada", 60, 1_000).unwrap();
    let foreign = sign_token_at("other", "ada", 60, i64::MAX / 2).unwrap();

    for token in ["garbage", expired.as_str(), foreign.as_str()] {
        let res = send(&app, Method::GET, "/protected", None, Some(token)).await;
        assert_eq!(res.status, StatusCode::FORBIDDEN);
        assert_eq!(res.json(), json!({ "message": "Invalid or expired token" }));
    }
}

#[tokio::test]
async fn protected_echoes_claims() {
    let app = app();
    let token = post(&app, "/login", json!({ "username": "grace" })).await.json()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let res = send(&app, Method::GET, "/protected", None, Some(&token)).await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["message"], "This is a protected route");
    assert_eq!(body["user"]["name"], "grace");
}

#[tokio::test]
async fn resources_are_open_by_default() {
    assert_eq!(get(&app(), "/contacts").await.status, StatusCode::OK);
}

#[tokio::test]
async fn resources_can_be_put_behind_auth() {
    let app = linq_app::app::build_router(default_state(), true);

    let anonymous = get(&app, "/contacts").await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = post(&app, "/login", json!({ "username": "ada" })).await.json()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let res = send(&app, Method::GET, "/notes/1", None, Some(&token)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = send(&app, Method::GET, "/contacts", None, Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);
}
