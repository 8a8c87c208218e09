use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

use crate::state::AppState;
use crate::{auth, contacts, error::panic_response, health, notes, simulate};

pub fn build_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/login", post(auth::login))
}

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn resource_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/contacts",
            post(contacts::create_contact).get(contacts::list_contacts),
        )
        .route(
            "/contacts/:id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route(
            "/contacts/:id/notes",
            post(notes::create_note).get(notes::list_notes_for_contact),
        )
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
}

pub fn build_router(state: Arc<AppState>, protect_resources: bool) -> Router {
    let require_token = middleware::from_fn_with_state(state.clone(), auth::require_token);

    let protected = Router::new()
        .route("/protected", get(auth::protected))
        .route_layer(require_token.clone());

    let resources = if protect_resources {
        resource_router().route_layer(require_token)
    } else {
        resource_router()
    };

    let timed = build_public_router()
        .merge(protected)
        .merge(resources)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT));

    // The retry loop runs to success or exhaustion; no timeout may cut it short.
    let upstream = Router::new().route("/simulate-upstream", get(simulate::simulate_upstream));

    with_error_boundary(timed.merge(upstream))
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state)
}

/// Panicking handlers answer with the same 500 body as `ApiError::Internal`.
pub fn with_error_boundary<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(CatchPanicLayer::custom(panic_response))
}
