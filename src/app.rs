use std::{net::SocketAddr, time::Duration};

use axum::{
    body::Body,
    http::{Request, Response},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, info_span, warn, Span};

use crate::{auth, frontend, profiles, state::AppState};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .merge(frontend::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(log_response),
        )
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(profiles::router())
        .route("/health", get(|| async { "ok" }))
}

fn request_span(req: &Request<Body>) -> Span {
    info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        authenticated = req.headers().contains_key(auth::extractors::AUTH_HEADER),
        status = tracing::field::Empty,
    )
}

/// 5xx are logged as errors, rejected requests (validation, auth) as warnings.
fn log_response(res: &Response<Body>, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", tracing::field::display(status));
    let latency_ms = latency.as_millis() as u64;
    if status.is_server_error() {
        error!(%status, latency_ms, "response");
    } else if status.is_client_error() {
        warn!(%status, latency_ms, "request rejected");
    } else {
        info!(%status, latency_ms, "response");
    }
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::testing::{body_text, call, test_state};

    #[tokio::test]
    async fn health_check() {
        let state = test_state();
        let res = call(&state, Method::GET, "/api/health", None, None).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "ok");
    }
}
