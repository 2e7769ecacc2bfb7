//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap a [`GateHandler`] in an axum router with request tracing
//! - Serve a bound listener until shutdown is signalled
//! - Cancel in-flight request contexts on shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::gate::Gate;
use crate::http::handler::{GateHandler, HandlerError};
use crate::lifecycle::Shutdown;

/// HTTP server serving one Gate.
pub struct HttpServer {
    router: Router,
    shutdown: Shutdown,
}

impl HttpServer {
    /// Create a server around an already configured handler.
    pub fn new(handler: GateHandler) -> Self {
        let shutdown = Shutdown::new();
        let router = handler
            .with_cancellation(shutdown.token().clone())
            .into_router()
            .layer(TraceLayer::new_for_http());

        Self { router, shutdown }
    }

    /// Handle that stops this server and cancels its request contexts.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Create a server for `gate` using the handler and timeout settings of `config`.
    pub fn from_config(gate: impl Gate + 'static, config: &ServerConfig) -> Result<Self, HandlerError> {
        let handler = GateHandler::new(gate)
            .with_buffer_size(config.handler.buffer_size)?
            .with_logging(config.handler.log_failures)
            .with_request_timeout(Duration::from_secs(config.timeouts.request_secs));
        Ok(Self::new(handler))
    }

    /// Serve `listener` until the shutdown handle fires, then drain
    /// in-flight requests.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let shutdown = self.shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.triggered().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
