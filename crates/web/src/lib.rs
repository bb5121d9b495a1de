pub use crate::common::RouteResult;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use flush::session::SessionHandle;
use surface::WebSurface;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

pub mod api;
pub mod common;
pub mod surface;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "./resources/www/";

#[derive(Clone, FromRef)]
pub struct WebState {
    pub session: SessionHandle,
    pub surface: Arc<WebSurface>,
}

pub fn router(state: WebState, static_dir: &str) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(ServeDir::new(static_dir))
}

pub async fn start_web_server(
    address: &str,
    static_dir: &str,
    state: WebState,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state, static_dir).into_make_service()).await?;

    Ok(())
}
