//! HTTP boundary of the lead capture service.
//!
//! Exposes the two submission endpoints used by the website forms, plus the
//! sitemap and a health check.

pub mod handlers;
pub mod sitemap;

use crate::services::LeadService;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Contact form endpoint.
pub const CONTACT_PATH: &str = "/api/contact";

/// Demo request form endpoint.
pub const DEMO_REQUEST_PATH: &str = "/api/demo-request";

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub service: LeadService,
    pub site_url: Arc<str>,
}

impl AppState {
    pub fn new(service: LeadService, site_url: impl Into<Arc<str>>) -> Self {
        Self {
            service,
            site_url: site_url.into(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(handlers::submit_contact))
        .route(DEMO_REQUEST_PATH, post(handlers::submit_demo_request))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // Health checks are merged after the trace layer to keep probes out of the logs
        .merge(Router::new().route("/health", get(handlers::health)))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn run_server(state: AppState, bind_address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("could not bind {}", bind_address))?;

    tracing::info!(
        "Lead capture server listening on {}",
        listener.local_addr().context("listener has no local address")?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running lead capture server")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
