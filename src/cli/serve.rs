use std::{net::SocketAddr, sync::Arc};

use crate::{
    api::DashboardState, config::CollectorSettings, error, info, server, spotify::CatalogApi,
    warning,
};

/// Serves the dashboard until the process is stopped.
///
/// With `open` set the browser is pointed at the dashboard of that playlist
/// once the listener is up.
pub async fn serve(
    api: Arc<dyn CatalogApi>,
    settings: CollectorSettings,
    addr: SocketAddr,
    open: Option<String>,
) {
    let state = DashboardState::new(api, settings);

    if let Some(link) = open {
        let url = server::dashboard_url(&addr, Some(&link));
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            info!("Opening {}", url);
            if webbrowser::open(&url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    url
                )
            }
        });
    }

    if let Err(e) = server::start_dashboard_server(state, addr).await {
        error!("Dashboard server stopped: {}", e);
    }
}
