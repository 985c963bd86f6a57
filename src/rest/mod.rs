// rest/mod.rs — the HTTP surface.
//
// One fallback route feeds every request (any method, any path) through the
// request interpreter and the dispatcher:
//   GET    /              → list tasks
//   GET    /{id}          → one task
//   POST   /{title}       → create
//   PUT    /{id}/{title}  → update
//   DELETE /{id}          → delete
//
// There is no reserved health path: every GET path is owned by the task API.

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::dispatch;
use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("task API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

/// Bridge one HTTP request to the dispatcher.
///
/// `uri.path()` is still percent-encoded here — decoding is the interpreter's
/// job, and it is deliberately narrow (`%20`, `%2F`, `+`).
async fn handle_request(
    State(ctx): State<Arc<AppContext>>,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    let raw_path = uri.path().strip_prefix('/').unwrap_or(uri.path());
    let reply = dispatch::handle(&ctx.tasks, Some(method.as_str()), raw_path).await;

    let status =
        StatusCode::from_u16(reply.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}
