use axum::http::Request;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use linq_app::{
    retry::{Sleeper, TokioSleeper},
    settings::Settings,
    state::AppState,
    upstream::SimulatedUpstream,
};
use linq_store::init_store;

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    linq_app::telemetry::init(&settings.log_filter);

    let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
    let upstream = Arc::new(SimulatedUpstream::from_entropy(sleeper.clone()));

    let state = Arc::new(AppState {
        db: init_store(),
        upstream,
        sleeper,
        upstream_retry: settings.upstream_retry,
        token_secret: settings.token_secret.clone(),
        token_ttl_secs: settings.token_ttl_secs,
    });

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                let request_id = req
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id
                )
            }),
        );

    let app = linq_app::app::build_router(state, settings.protect_resources).layer(middleware);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", settings.bind_addr))?;

    tracing::info!(
        addr = %settings.bind_addr,
        max_retries = settings.upstream_retry.max_retries,
        initial_delay_ms = settings.upstream_retry.initial_delay.as_millis() as u64,
        protect_resources = settings.protect_resources,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(linq_app::shutdown::shutdown())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    Ok(())
}
