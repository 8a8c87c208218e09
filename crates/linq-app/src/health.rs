use axum::{http::StatusCode, response::IntoResponse};

pub async fn index() -> &'static str {
    "Linq Backend Assessment API is up and running!"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
