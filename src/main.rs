//! torii demo server.
//!
//! # Gate Tree
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!   request ─────▶│ Fork (fallback: NotFound)    │
//!                 │                              │
//!                 │  GET  /health ─▶ "ok"        │
//!                 │  POST /echo   ─▶ echo body   │
//!                 │  GET  /api ─┐                │
//!                 │  POST /api ─┴─▶ Fork         │
//!                 │               GET  /hello    │
//!                 │               POST /session  │──▶ Set-Cookie
//!                 └──────────────────────────────┘
//! ```
//!
//! Configuration is read from the TOML file given with `--config`; without
//! it every setting uses its default.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use uuid::Uuid;

use torii::config::{load_config, ServerConfig};
use torii::cookie::{self, SameSite};
use torii::gate::{self, GateExt, NotFound};
use torii::http::StatusCode;
use torii::observability::logging;
use torii::{lifecycle, Context, Endpoint, Fork, Method, Request, Response};

#[derive(Parser)]
#[command(name = "torii")]
#[command(about = "Serve a sample torii Gate tree", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!("torii v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        buffer_size = config.handler.buffer_size,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let root = build_tree()?;
    for (segment, method) in root.routes() {
        tracing::info!(%method, segment = %format!("/{segment}"), "Route registered");
    }

    lifecycle::run(root, &config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_tree() -> Result<Fork, Box<dyn std::error::Error>> {
    let session_options = vec![
        cookie::http_only(),
        cookie::path("/")?,
        cookie::same_site(SameSite::Lax),
        cookie::max_age(Duration::from_secs(3600)),
    ];
    let session = gate::from_fn(|_ctx, _request| async {
        Response::text(StatusCode::OK, "session started")
    })
    .map_response(move |response| {
        cookie::set(
            response,
            "session",
            &Uuid::new_v4().to_string(),
            session_options.clone(),
        )
    });

    let api = Fork::new(
        NotFound,
        [
            Endpoint::new(Method::Get, "/hello", gate::from_fn(hello))?,
            Endpoint::new(Method::Post, "/session", session)?,
        ],
    )?
    .shared();

    let root = Fork::new(
        NotFound,
        [
            Endpoint::new(Method::Get, "/health", gate::from_fn(health))?,
            Endpoint::new(Method::Post, "/echo", gate::from_fn(echo))?,
            Endpoint::shared(Method::Get, "/api", api.clone())?,
            Endpoint::shared(Method::Post, "/api", api)?,
        ],
    )?;
    Ok(root)
}

async fn health(_ctx: Context, _request: Request) -> Response {
    Response::text(StatusCode::OK, "ok")
}

async fn hello(_ctx: Context, request: Request) -> Response {
    let name = request.path().trim_matches('/');
    let name = if name.is_empty() { "world" } else { name };
    Response::text(StatusCode::OK, format!("hello, {name}"))
}

/// Streams the request body straight back.
async fn echo(_ctx: Context, request: Request) -> Response {
    let mut response = Response::new(StatusCode::OK);
    if let Some(content_type) = request.head.first("content-type") {
        response = response.with_header("Content-Type", content_type);
    }
    response.with_body(request.body)
}
