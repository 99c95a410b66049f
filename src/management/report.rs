use crate::{
    config::CollectorSettings,
    errors::DashboardError,
    management::{TrackCollector, TrackEnricher, TrackTable},
    spotify::CatalogApi,
    types::{CollectionOutcome, PlaylistMetadata},
    utils,
};

/// Everything a renderer needs for one playlist.
#[derive(Debug, Clone)]
pub struct PlaylistReport {
    pub playlist_id: String,
    pub metadata: PlaylistMetadata,
    /// `None` when no track could be turned into a row.
    pub table: Option<TrackTable>,
    pub collection: CollectionOutcome,
    pub collected: usize,
    pub artist_lookups: usize,
    pub warn_on_partial: bool,
}

impl PlaylistReport {
    /// User facing notice for a truncated collection, only when asked for.
    pub fn partial_notice(&self) -> Option<String> {
        match (&self.collection, self.warn_on_partial) {
            (CollectionOutcome::Truncated { offset, reason }, true) => Some(format!(
                "Only {} of {} tracks could be collected (stopped at offset {}: {}).",
                self.collected, self.metadata.total_tracks, offset, reason
            )),
            _ => None,
        }
    }

    /// Message explaining an empty table, distinct from fetch errors.
    pub fn empty_message(&self) -> Option<&'static str> {
        match (&self.table, self.collected) {
            (Some(_), _) => None,
            (None, 0) => Some("Could not retrieve tracks for this playlist."),
            (None, _) => Some("No track data available to create the table."),
        }
    }
}

/// Runs the whole pipeline for one playlist link.
///
/// Link validation and metadata failures end the run with an error. Failures
/// while collecting pages or enriching tracks only shrink the result.
pub async fn build_report(
    api: &dyn CatalogApi,
    link: &str,
    settings: &CollectorSettings,
) -> Result<PlaylistReport, DashboardError> {
    if !utils::is_playlist_link(link) {
        return Err(DashboardError::InvalidLink(link.trim().to_string()));
    }
    let playlist_id = utils::parse_playlist_id(link)?;

    let metadata: PlaylistMetadata = api
        .playlist(&playlist_id)
        .await
        .map_err(|e| DashboardError::MetadataUnavailable(e.to_string()))?
        .into();

    let collected = TrackCollector::new(settings.clone())
        .collect(api, &playlist_id)
        .await;

    let mut enricher = TrackEnricher::new();
    let tracks = enricher.enrich_all(api, &collected.items).await;

    Ok(PlaylistReport {
        playlist_id,
        metadata,
        table: TrackTable::assemble(tracks),
        collection: collected.outcome,
        collected: collected.items.len(),
        artist_lookups: enricher.artist_lookups(),
        warn_on_partial: settings.warn_on_partial,
    })
}
