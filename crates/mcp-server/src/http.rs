//! Long-lived streaming delivery channel.
//!
//! Serves the MCP session over SSE (`/sse` stream plus `/message` post
//! endpoint) with a `/health` liveness route reporting fixed readiness.
//! A fresh [`WikiService`] is constructed per inbound connection; the
//! service is stateless, so this differs from sharing one instance only in
//! lifecycle, not behavior.

use std::net::SocketAddr;

use anyhow::Result;
use axum::routing::get;
use axum::Json;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use wiki_client::WikiClient;

use crate::tools::WikiService;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn serve(addr: SocketAddr, client: WikiClient) -> Result<()> {
    let ct = CancellationToken::new();
    let (sse_server, router) = SseServer::new(SseServerConfig {
        bind: addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: ct.clone(),
        sse_keep_alive: None,
    });
    let router = router.route("/health", get(health_check));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Serving SSE on http://{addr}/sse");

    let shutdown = ct.child_token();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await });
    tokio::spawn(async move {
        if let Err(err) = server.await {
            log::error!("HTTP server error: {err}");
        }
    });

    let service_ct = sse_server.with_service(move || WikiService::new(client.clone()));

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down");
    service_ct.cancel();
    ct.cancel();
    Ok(())
}
