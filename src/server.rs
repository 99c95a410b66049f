use axum::{Router, routing::get};
use std::net::SocketAddr;

use crate::{Res, api, api::DashboardState, success};

pub fn make_app(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/dashboard", get(api::dashboard))
        .route("/health", get(api::health))
        .with_state(state)
}

pub async fn start_dashboard_server(state: DashboardState, addr: SocketAddr) -> Res<()> {
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Dashboard available at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// URL of the dashboard for a playlist link on a server bound to `addr`.
pub fn dashboard_url(addr: &SocketAddr, link: Option<&str>) -> String {
    match link {
        Some(link) => format!(
            "http://{}/dashboard?link={}",
            addr,
            urlencoding::encode(link)
        ),
        None => format!("http://{}/", addr),
    }
}
