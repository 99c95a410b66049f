use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::CollectorSettings,
    dashboard::{Dashboard, Histogram, WordWeight, YearCount, summarize},
    error, info,
    management::{PlaylistReport, build_report},
    spotify::CatalogApi,
    success,
    types::{CountTableRow, TrackTableRow},
    utils, warning,
};

const BAR_WIDTH: usize = 40;
const CLOUD_WORDS_SHOWN: usize = 15;

/// Renders the dashboard of a playlist in the terminal.
///
/// Invalid links and unavailable playlists terminate the program with an
/// error message; an empty playlist prints its metadata and a notice.
pub async fn show(api: &dyn CatalogApi, link: &str, settings: &CollectorSettings) {
    if !utils::is_playlist_link(link) {
        error!("Please enter a valid Spotify playlist link.");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlist data...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let report = match build_report(api, link, settings).await {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();

    print_report(&report);
}

pub fn print_report(report: &PlaylistReport) {
    if let Some(notice) = report.partial_notice() {
        warning!("{}", notice);
    }

    let Some(table) = &report.table else {
        print_summary(report);
        warning!("{}", report.empty_message().unwrap_or("No data to visualize."));
        return;
    };

    let dashboard = Dashboard::build(&report.metadata, table);
    print_summary(report);

    let rows: Vec<TrackTableRow> = dashboard.rows.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));

    info!("Release Year Distribution");
    println!("{}", Table::new(year_rows(&dashboard.release_years)));

    info!("Popularity Distribution");
    println!("{}", Table::new(histogram_rows(&dashboard.popularity)));

    match &dashboard.word_cloud {
        Some(words) => {
            info!("Top Genres");
            println!("{}", Table::new(word_rows(words)));
        }
        None => info!("No genre data available to create word cloud."),
    }

    success!(
        "{} tracks collected, {} rows, {} artists looked up",
        report.collected,
        table.len(),
        report.artist_lookups
    );
}

fn print_summary(report: &PlaylistReport) {
    let summary = summarize(&report.metadata, report.table.as_ref());
    info!("Name: {}", summary.name);
    info!("Description: {}", summary.description);
    info!("Likes: {}", summary.followers);
    info!("Total Tracks: {}", summary.total_tracks);
    if let Some(duration) = summary.total_duration {
        info!("Total Duration: {}", duration);
    }
    if let Some(thumbnail) = summary.thumbnail {
        info!("Thumbnail: {}", thumbnail);
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

fn year_rows(years: &[YearCount]) -> Vec<CountTableRow> {
    let max = years.iter().map(|y| y.count).max().unwrap_or(0);
    years
        .iter()
        .map(|y| CountTableRow {
            label: y.year.to_string(),
            count: y.count,
            bar: bar(y.count, max),
        })
        .collect()
}

fn histogram_rows(histogram: &Histogram) -> Vec<CountTableRow> {
    let max = histogram.max_count();
    histogram
        .bins
        .iter()
        .map(|b| CountTableRow {
            label: format!("{:.1} - {:.1}", b.start, b.end),
            count: b.count,
            bar: bar(b.count, max),
        })
        .collect()
}

fn word_rows(words: &[WordWeight]) -> Vec<CountTableRow> {
    let max = words.first().map(|w| w.count).unwrap_or(0);
    words
        .iter()
        .take(CLOUD_WORDS_SHOWN)
        .map(|w| CountTableRow {
            label: w.word.clone(),
            count: w.count,
            bar: bar(w.count, max),
        })
        .collect()
}
