use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;

use crate::{
    config::CollectorSettings,
    dashboard::html,
    errors::DashboardError,
    info,
    management::build_report,
    spotify::CatalogApi,
    success, utils, warning,
};

/// Shared by every request; each request still builds its own report.
#[derive(Clone)]
pub struct DashboardState {
    pub api: Arc<dyn CatalogApi>,
    pub settings: CollectorSettings,
}

impl DashboardState {
    pub fn new(api: Arc<dyn CatalogApi>, settings: CollectorSettings) -> Self {
        Self { api, settings }
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub link: Option<String>,
}

pub async fn index() -> Html<String> {
    Html(html::render_index())
}

pub async fn dashboard(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> (StatusCode, Html<String>) {
    let link = query.link.unwrap_or_default();
    let link = link.trim();

    if link.is_empty() {
        return (StatusCode::OK, Html(html::render_index()));
    }

    if !utils::is_playlist_link(link) {
        return (
            StatusCode::BAD_REQUEST,
            Html(html::render_error(
                link,
                "Please enter a valid Spotify playlist link.",
            )),
        );
    }

    info!("Fetching playlist data for {}", link);
    match build_report(state.api.as_ref(), link, &state.settings).await {
        Ok(report) => {
            success!(
                "Playlist {} ready: {} tracks collected, {} artists looked up",
                report.playlist_id,
                report.collected,
                report.artist_lookups
            );
            (StatusCode::OK, Html(html::render_dashboard(link, &report)))
        }
        Err(e) => {
            warning!("{}", e);
            let status = match &e {
                DashboardError::InvalidLink(_) => StatusCode::BAD_REQUEST,
                DashboardError::MetadataUnavailable(_) => StatusCode::BAD_GATEWAY,
            };
            (status, Html(html::render_error(link, &capitalize(&e.to_string()))))
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
