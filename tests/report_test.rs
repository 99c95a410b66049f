mod common;

use common::{FakeCatalog, LINK, entries, settings, track_entry};
use playlistdash::{
    config::CollectorSettings,
    dashboard::Dashboard,
    errors::DashboardError,
    management::{TrackEnricher, TrackTable, build_report},
    types::{NO_GENRES, RawTrackRecord, UNKNOWN_ARTIST, UNKNOWN_ARTIST_ID},
};
use serde_json::{Value, json};

#[tokio::test]
async fn test_end_to_end_two_track_playlist() {
    let mut catalog = FakeCatalog::with_entries(vec![
        track_entry(0, "a1", json!(80), "2019-05-01"),
        track_entry(1, "a2", json!(40), "2021"),
    ])
    .with_artist("a1", &["indie pop", "dream pop"])
    .with_artist("a2", &["shoegaze"]);
    catalog.metadata = Some(json!({
        "name": "Test Mix",
        "description": "",
        "images": [{"url": "https://i.scdn.co/image/cover"}],
        "followers": {"total": 12},
        "tracks": {"total": 2}
    }));

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();

    assert_eq!(report.playlist_id, "37i9dQZF1DXcBWIGoYBM5M");
    assert_eq!(report.metadata.name, "Test Mix");
    assert_eq!(report.metadata.total_tracks, 2);
    assert_eq!(report.metadata.followers, 12);
    assert_eq!(report.metadata.description, None);
    assert_eq!(
        report.metadata.thumbnail.as_deref(),
        Some("https://i.scdn.co/image/cover")
    );
    assert_eq!(report.collected, 2);
    assert_eq!(catalog.page_requests(), 1);

    let table = report.table.as_ref().expect("table with rows");
    assert_eq!(table.len(), 2);

    let dashboard = Dashboard::build(&report.metadata, table);
    assert!(dashboard.release_years.len() <= 2);
    assert_eq!(dashboard.release_years[0].year, 2019);
    assert_eq!(dashboard.release_years[1].year, 2021);
    assert_eq!(dashboard.popularity.bins.len(), 20);
    assert_eq!(dashboard.popularity.total(), 2);
    assert_eq!(dashboard.summary.description, "No description available");
    assert_eq!(dashboard.summary.total_duration.as_deref(), Some("6m 00s"));

    let words = dashboard.word_cloud.expect("genre words");
    assert_eq!(words[0].word, "pop");
    assert_eq!(words[0].count, 2);
}

#[tokio::test]
async fn test_missing_artist_lookup_yields_marker_and_keeps_track() {
    let catalog = FakeCatalog::with_entries(vec![
        track_entry(0, "known", json!(10), "2000-01-01"),
        track_entry(1, "broken", json!(20), "2001-01-01"),
    ])
    .with_artist("known", &["jazz"]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();
    let table = report.table.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].genres, "jazz");
    assert_eq!(table.rows()[1].genres, NO_GENRES);
    assert_eq!(table.rows()[1].name, "Track 1");
}

#[tokio::test]
async fn test_artist_lookups_are_memoized_per_report() {
    let catalog = FakeCatalog::with_entries(vec![
        track_entry(0, "a1", json!(10), "2000"),
        track_entry(1, "a2", json!(20), "2000"),
        track_entry(2, "a1", json!(30), "2000"),
        track_entry(3, "missing", json!(30), "2000"),
        track_entry(4, "missing", json!(30), "2000"),
    ])
    .with_artist("a1", &["rock"])
    .with_artist("a2", &["pop"]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();

    assert_eq!(catalog.artist_requests(), vec!["a1", "a2", "missing"]);
    assert_eq!(report.artist_lookups, 3);
    let genres: Vec<String> = report
        .table
        .unwrap()
        .rows()
        .iter()
        .map(|r| r.genres.clone())
        .collect();
    assert_eq!(genres, vec!["rock", "pop", "rock", NO_GENRES, NO_GENRES]);
}

#[tokio::test]
async fn test_null_and_removed_tracks_are_skipped() {
    let catalog = FakeCatalog::with_entries(vec![
        track_entry(0, "a1", json!(10), "2000"),
        Value::Null,
        json!({"added_at": "2024-01-01T00:00:00Z", "track": null}),
        track_entry(3, "a1", json!(10), "2000"),
    ])
    .with_artist("a1", &["rock"]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();

    assert_eq!(report.collected, 4);
    let names: Vec<String> = report
        .table
        .unwrap()
        .rows()
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["Track 0", "Track 3"]);
}

#[tokio::test]
async fn test_popularity_is_coerced_in_the_table() {
    let mut without_popularity = track_entry(0, "a1", json!(0), "2000");
    without_popularity["track"]
        .as_object_mut()
        .unwrap()
        .remove("popularity");

    let catalog = FakeCatalog::with_entries(vec![
        without_popularity,
        track_entry(1, "a1", Value::Null, "2000"),
        track_entry(2, "a1", json!("not a number"), "2000"),
        track_entry(3, "a1", json!(87), "2000"),
        track_entry(4, "a1", json!("42"), "2000"),
    ])
    .with_artist("a1", &[]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();

    assert_eq!(report.table.unwrap().popularity(), vec![0, 0, 0, 87, 42]);
}

#[tokio::test]
async fn test_invalid_release_dates_give_unknown_year() {
    let catalog = FakeCatalog::with_entries(vec![
        track_entry(0, "a1", json!(1), "199"),
        track_entry(1, "a1", json!(1), "abcd-01-01"),
        track_entry(2, "a1", json!(1), ""),
        track_entry(3, "a1", json!(1), "1987-03-02"),
    ])
    .with_artist("a1", &["synthpop"]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();
    let table = report.table.unwrap();

    let years: Vec<Option<i32>> = table.rows().iter().map(|r| r.release_year).collect();
    assert_eq!(years, vec![None, None, None, Some(1987)]);
    assert_eq!(table.release_years(), vec![1987]);
}

#[tokio::test]
async fn test_track_without_artists_uses_placeholders_without_lookup() {
    let catalog = FakeCatalog::with_entries(vec![json!({
        "track": {"id": "t0", "name": "Lonely", "artists": [], "album": {"name": "A", "release_date": "2010"}}
    })]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();
    let table = report.table.unwrap();

    assert!(catalog.artist_requests().is_empty());
    assert_eq!(table.rows()[0].artist, UNKNOWN_ARTIST);
    assert_eq!(table.rows()[0].artist_id, UNKNOWN_ARTIST_ID);
    assert_eq!(table.rows()[0].genres, NO_GENRES);
}

#[tokio::test]
async fn test_invalid_link_stops_before_any_request() {
    let catalog = FakeCatalog::with_entries(entries(3));

    let err = build_report(&catalog, "https://example.com/album/123", &settings())
        .await
        .unwrap_err();

    assert!(matches!(err, DashboardError::InvalidLink(_)));
    assert_eq!(catalog.page_requests(), 0);
}

#[tokio::test]
async fn test_metadata_failure_is_surfaced() {
    let mut catalog = FakeCatalog::with_entries(entries(3));
    catalog.metadata = None;

    let err = build_report(&catalog, LINK, &settings()).await.unwrap_err();

    assert!(matches!(err, DashboardError::MetadataUnavailable(_)));
    assert_eq!(catalog.page_requests(), 0);
}

#[tokio::test]
async fn test_empty_playlist_has_no_table_but_a_message() {
    let catalog = FakeCatalog::with_entries(Vec::new());

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();

    assert!(report.table.is_none());
    assert_eq!(
        report.empty_message(),
        Some("Could not retrieve tracks for this playlist.")
    );
}

#[tokio::test]
async fn test_only_removed_tracks_has_distinct_message() {
    let catalog = FakeCatalog::with_entries(vec![json!({"track": null})]);

    let report = build_report(&catalog, LINK, &settings()).await.unwrap();

    assert!(report.table.is_none());
    assert_eq!(
        report.empty_message(),
        Some("No track data available to create the table.")
    );
}

#[tokio::test]
async fn test_partial_notice_only_when_requested() {
    let mut catalog = FakeCatalog::with_entries(entries(150)).with_artist("a1", &["rock"]);
    catalog.fail_at_offset = Some(100);

    let quiet = build_report(&catalog, LINK, &settings()).await.unwrap();
    assert_eq!(quiet.collected, 100);
    assert!(quiet.partial_notice().is_none());

    let loud_settings = CollectorSettings {
        warn_on_partial: true,
        ..settings()
    };
    let loud = build_report(&catalog, LINK, &loud_settings).await.unwrap();
    let notice = loud.partial_notice().expect("notice for truncated collection");
    assert!(notice.contains("100 of 150"));
}

#[tokio::test]
async fn test_enricher_keeps_order_of_records() {
    let catalog = FakeCatalog::with_entries(Vec::new())
        .with_artist("a1", &["rock"])
        .with_artist("a2", &["pop"]);
    let records: Vec<RawTrackRecord> = vec![
        RawTrackRecord(track_entry(0, "a2", json!(1), "2000")),
        RawTrackRecord(track_entry(1, "a1", json!(1), "2000")),
    ];

    let mut enricher = TrackEnricher::new();
    let tracks = enricher.enrich_all(&catalog, &records).await;

    assert_eq!(tracks[0].name, "Track 0");
    assert_eq!(tracks[1].name, "Track 1");
    assert_eq!(enricher.artist_lookups(), 2);
    assert!(TrackTable::assemble(Vec::new()).is_none());
}
