use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::ToSocketAddrs;

use crate::cgroup::{Collector, Measurement, SINK_CAPACITY};

mod exposition;

pub use exposition::{Exposition, ExpositionError};

/// Runs one collection pass and renders it for Prometheus.
///
/// The pass runs on a blocking thread and streams into a bounded channel that this handler
/// drains; the channel closing marks the end of the snapshot.
async fn metrics(State(collector): State<Arc<Collector>>) -> Response {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Measurement>(SINK_CAPACITY);
    let pass = tokio::task::spawn_blocking(move || {
        let mut tx = tx;
        collector.collect_into(&mut tx)
    });

    let mut exposition = Exposition::new();
    while let Some(measurement) = rx.recv().await {
        if let Err(err) = exposition.record(&measurement) {
            log::error!("failed to expose `{}`: {}", measurement.name(), err);
        }
    }
    if let Err(err) = pass.await {
        log::error!("collection pass failed: {}", err);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "collection pass failed",
        )
            .into_response();
    }

    match exposition.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(err) => {
            log::error!("failed to encode metrics: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to encode metrics",
            )
                .into_response()
        }
    }
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new(collector: Arc<Collector>) -> Self {
        let router = axum::Router::new()
            .route("/metrics", get(metrics))
            .with_state(collector);
        Self { router }
    }

    pub fn into_router(self) -> axum::Router {
        self.router
    }

    /// Serves scrapes on `addr` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or serving fails.
    pub async fn listen(
        self,
        addr: impl ToSocketAddrs,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
