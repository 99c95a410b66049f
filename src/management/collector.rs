use tokio::time::sleep;

use crate::{
    config::CollectorSettings,
    spotify::CatalogApi,
    types::{CollectedTracks, CollectionOutcome, PlaylistTracksPage, RawTrackRecord},
    warning,
};

/// Walks the playlist entries page by page until the playlist is exhausted.
///
/// Request failures never escape: the collector logs them and hands back what
/// it gathered so far, marking the result as truncated.
pub struct TrackCollector {
    settings: CollectorSettings,
}

impl TrackCollector {
    pub fn new(settings: CollectorSettings) -> Self {
        Self { settings }
    }

    pub async fn collect(&self, api: &dyn CatalogApi, playlist_id: &str) -> CollectedTracks {
        let page_size = self.settings.page_size.max(1);
        let mut items: Vec<RawTrackRecord> = Vec::new();
        let mut offset: u32 = 0;
        let mut requests: u32 = 0;
        let mut announced: (Option<u64>, Option<String>) = (None, None);

        loop {
            if requests >= self.settings.max_pages {
                // The cap only truncates when the API still announces more entries.
                let exhausted = requests > 0
                    && announced.1.is_none()
                    && announced.0 == Some(items.len() as u64);
                let outcome = if exhausted {
                    CollectionOutcome::Complete
                } else {
                    warning!(
                        "Stopped collecting playlist {} after {} pages",
                        playlist_id,
                        requests
                    );
                    CollectionOutcome::Truncated {
                        offset,
                        reason: format!("page limit of {} reached", self.settings.max_pages),
                    }
                };
                return finish(items, outcome, requests);
            }

            requests += 1;
            let page = match api.playlist_tracks(playlist_id, offset, page_size).await {
                Ok(Some(page)) => page,
                Ok(None) => {
                    warning!("Empty response for playlist {} at offset {}", playlist_id, offset);
                    return finish(items, truncated(offset, "empty response"), requests);
                }
                Err(e) => {
                    warning!("Error fetching tracks at offset {}: {}", offset, e);
                    return finish(items, truncated(offset, &e.to_string()), requests);
                }
            };

            let PlaylistTracksPage { items: page_items, total, next } = page;
            let Some(page_items) = page_items else {
                warning!("Response without items for playlist {} at offset {}", playlist_id, offset);
                return finish(items, truncated(offset, "response without items"), requests);
            };

            let received = page_items.len();
            items.extend(page_items);

            if received < page_size as usize {
                return finish(items, CollectionOutcome::Complete, requests);
            }

            announced = (total, next);
            if !self.settings.page_delay.is_zero() {
                sleep(self.settings.page_delay).await;
            }
            offset += page_size;
        }
    }
}

fn truncated(offset: u32, reason: &str) -> CollectionOutcome {
    CollectionOutcome::Truncated {
        offset,
        reason: reason.to_string(),
    }
}

fn finish(items: Vec<RawTrackRecord>, outcome: CollectionOutcome, requests: u32) -> CollectedTracks {
    CollectedTracks {
        items,
        outcome,
        requests,
    }
}
