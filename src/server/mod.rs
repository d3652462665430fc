//! HTTP server for the portfolio chat API.
//!
//! Provides REST endpoints for:
//! - Chat exchanges against the response engine
//! - Recent-interaction analytics
//! - Health checks
//!
//! The server also owns the session sweeper: it starts alongside the
//! listener and is stopped when the listener shuts down.

pub mod interactions;
pub mod routes;
pub mod sessions;
pub mod state;

pub use routes::create_router;
pub use sessions::{SessionStore, SessionSweeper};
pub use state::AppState;

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Start the HTTP server.
///
/// # Errors
/// Returns an error if the listener fails to bind.
pub async fn run_server(
    state: Arc<AppState>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    run_server_with_shutdown(state, port, std::future::pending()).await
}

/// Start the HTTP server with graceful shutdown support.
///
/// New connections stop being accepted when `shutdown_signal` completes;
/// the session sweeper is stopped once the listener has drained.
///
/// # Errors
/// Returns an error if the listener fails to bind.
pub async fn run_server_with_shutdown<F>(
    state: Arc<AppState>,
    port: u16,
    shutdown_signal: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let sweeper = SessionSweeper::new(Arc::clone(&state.sessions), SWEEP_INTERVAL);
    let sweeper_shutdown = sweeper.shutdown_notifier();
    let sweeper_handle = sweeper.spawn();

    let app: Router = create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = bind_addr(port);
    tracing::info!("Portfolio chat server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await;

    sweeper_shutdown.notify_one();
    let _ = sweeper_handle.await;

    served?;
    Ok(())
}

/// Listener address: `PORTFOLIO_CHAT_BIND` (an IP) when set, else all
/// interfaces.
fn bind_addr(port: u16) -> SocketAddr {
    let ip = std::env::var("PORTFOLIO_CHAT_BIND")
        .ok()
        .and_then(|host| host.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    SocketAddr::new(ip, port)
}
