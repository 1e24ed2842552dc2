//! HTTP front end: routes, shared state and page rendering.
//!
//! ```text
//! GET /{handle}            timeline colored by sentiment
//! GET /following/{handle}  followed accounts by follower count
//! GET /favicon.ico         static icon
//! ```
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tweetmood_social::SocialApi;

pub mod color;
mod error;
mod handlers;
pub mod pages;
pub mod stats;

pub use color::{Gradient, add_color, gradient_index};
pub use error::WebError;
pub use pages::Pages;
pub use stats::median;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SocialApi>,
    pub gradient: Arc<Gradient>,
    pub pages: Arc<Pages>,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Precomputes the gradient and compiles the page templates.
    pub fn new(api: Arc<dyn SocialApi>, static_dir: impl Into<PathBuf>) -> Result<Self, WebError> {
        Ok(Self {
            api,
            gradient: Arc::new(Gradient::red_to_green()),
            pages: Arc::new(Pages::new()?),
            static_dir: static_dir.into(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/favicon.ico", get(handlers::favicon))
        .route("/{handle}", get(handlers::timeline))
        .route("/following/{handle}", get(handlers::following))
        .with_state(state)
}

/// Serves until `shutdown` resolves, then drains in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "server.listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("server.stopped");
    Ok(())
}
