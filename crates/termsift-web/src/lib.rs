use anyhow::{Context, Result};
use axum::{Router, middleware, routing::get};
use tracing::info;

use termsift_core::Termsift;

mod dto;
mod error;
mod handlers;
mod security;


pub const API_PREFIX: &str = "/api/v01";

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) app: Termsift,
}

impl WebState {
    fn new(app: Termsift) -> Self {
        Self { app }
    }
}

/// Serve the read API over the live generation and block until shutdown.
///
/// # Errors
/// Returns an error when the runtime cannot be created, the socket cannot be
/// bound, or the server exits with a runtime failure.
pub fn serve_web(app: Termsift, host: &str, port: u16) -> Result<()> {
    let state = WebState::new(app);
    let generation = state
        .app
        .handle()
        .current()
        .context("failed to read the live generation")?;
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    info!(
        generation = generation.name(),
        sample_groups = generation.sample_groups().len(),
        terms = generation.terms().len(),
        "serving live generation"
    );

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        info!(addr = %listener.local_addr()?, prefix = API_PREFIX, "termsift api listening");

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .context("web server failed")
    })
}

pub(crate) fn app_router(state: WebState) -> Router {
    let api = Router::new()
        .route("/samples", get(handlers::samples_json))
        .route("/samples.json", get(handlers::samples_json))
        .route("/samples.csv", get(handlers::samples_csv))
        .route("/runs.csv", get(handlers::runs_csv))
        .route("/runs.ids.txt", get(handlers::run_ids))
        .route("/terms", get(handlers::terms));
    Router::new()
        .nest(API_PREFIX, api)
        .layer(middleware::from_fn(security::security_headers_middleware))
        .with_state(state)
}
