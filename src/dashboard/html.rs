use crate::{
    dashboard::{Dashboard, Histogram, Summary, WordWeight, YearCount, summarize},
    management::PlaylistReport,
    utils,
};

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 40.0;
const MARGIN_TOP: f64 = 16.0;
const CLOUD_MIN_PX: f64 = 12.0;
const CLOUD_MAX_PX: f64 = 56.0;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; color: #222; }
aside { width: 260px; min-height: 100vh; background: #f0f2f6; padding: 24px; box-sizing: border-box; }
aside input { width: 100%; padding: 6px; box-sizing: border-box; margin: 8px 0; }
main { flex: 1; padding: 24px 48px; overflow-x: auto; }
table { border-collapse: collapse; font-size: 13px; }
th, td { border: 1px solid #ddd; padding: 4px 8px; text-align: left; }
th { background: #fafafa; }
.error { background: #ffe3e3; color: #9b1c1c; padding: 12px; border-radius: 4px; }
.notice { background: #fff6d6; color: #7a5b00; padding: 12px; border-radius: 4px; }
.cloud { max-width: 800px; line-height: 1.1; text-align: center; }
.cloud span { display: inline-block; margin: 2px 8px; color: #1f77b4; }
"#;

/// Landing page with the playlist link form.
pub fn render_index() -> String {
    page("Spotify Playlist Dashboard", "", None)
}

/// Error page; no partial dashboard is shown next to the message.
pub fn render_error(link: &str, message: &str) -> String {
    let body = format!(
        "<h1>Spotify Playlist Dashboard</h1><p class=\"error\">{}</p>",
        escape_html(message)
    );
    page("Spotify Playlist Dashboard", &body, Some(link))
}

/// Full dashboard page for a report.
pub fn render_dashboard(link: &str, report: &PlaylistReport) -> String {
    let mut body = String::from("<h1>Spotify Playlist Dashboard</h1>");

    if let Some(notice) = report.partial_notice() {
        body.push_str(&format!("<p class=\"notice\">{}</p>", escape_html(&notice)));
    }

    match &report.table {
        Some(table) => {
            let dashboard = Dashboard::build(&report.metadata, table);
            body.push_str(&render_panels(&dashboard));
        }
        None => {
            body.push_str(&render_summary(&summarize(&report.metadata, None)));
            let message = report.empty_message().unwrap_or("No data to visualize.");
            body.push_str(&format!("<p class=\"error\">{}</p>", escape_html(message)));
        }
    }

    page(
        &format!("{} - Spotify Playlist Dashboard", report.metadata.name),
        &body,
        Some(link),
    )
}

pub fn render_panels(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str(&render_summary(&dashboard.summary));

    out.push_str("<h2>Track Details</h2>");
    out.push_str(&render_table(dashboard));

    out.push_str("<h2>Release Year Distribution</h2>");
    out.push_str(&release_year_chart(&dashboard.release_years));

    out.push_str("<h2>Popularity Distribution</h2>");
    out.push_str(&popularity_chart(&dashboard.popularity));

    out.push_str("<h2>Genre Word Cloud</h2>");
    match &dashboard.word_cloud {
        Some(words) => out.push_str(&word_cloud(words)),
        None => out.push_str("<p>No genre data available to create word cloud.</p>"),
    }
    out
}

fn render_summary(summary: &Summary) -> String {
    let mut out = String::from("<h2>Playlist Metadata</h2>");
    out.push_str(&format!(
        "<p><strong>Name:</strong> {}</p>\
         <p><strong>Description:</strong> {}</p>\
         <p><strong>Likes:</strong> {}</p>\
         <p><strong>Total Tracks:</strong> {}</p>",
        escape_html(&summary.name),
        escape_html(&summary.description),
        summary.followers,
        summary.total_tracks,
    ));
    if let Some(duration) = &summary.total_duration {
        out.push_str(&format!(
            "<p><strong>Total Duration:</strong> {}</p>",
            escape_html(duration)
        ));
    }
    if let Some(thumbnail) = &summary.thumbnail {
        out.push_str(&format!(
            "<img src=\"{}\" width=\"300\" alt=\"playlist cover\">",
            escape_html(thumbnail)
        ));
    }
    out
}

fn render_table(dashboard: &Dashboard) -> String {
    let mut out = String::from(
        "<table><thead><tr><th>Track Name</th><th>Track ID</th><th>Artist</th>\
         <th>Artist ID</th><th>Album</th><th>Album Release Date</th><th>Release Year</th>\
         <th>External URL</th><th>Popularity</th><th>Duration</th><th>Genres</th>\
         <th>Country</th></tr></thead><tbody>",
    );

    for row in &dashboard.rows {
        let url = match &row.external_url {
            Some(url) => format!(
                "<a href=\"{url}\" target=\"_blank\">{url}</a>",
                url = escape_html(url)
            ),
            None => "No URL".to_string(),
        };
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.name),
            escape_html(&row.id),
            escape_html(&row.artist),
            escape_html(&row.artist_id),
            escape_html(&row.album),
            escape_html(&row.release_date),
            row.release_year.map(|y| y.to_string()).unwrap_or_default(),
            url,
            row.popularity,
            row.duration_ms.map(utils::format_duration).unwrap_or_default(),
            escape_html(&row.genres),
            escape_html(&row.country),
        ));
    }

    out.push_str("</tbody></table>");
    out
}

/// One bar per year, labels thinned out when there are many years.
pub fn release_year_chart(years: &[YearCount]) -> String {
    if years.is_empty() {
        return "<p>No release year data available.</p>".to_string();
    }

    let max_count = years.iter().map(|y| y.count).max().unwrap_or(1).max(1);
    let plot_w = CHART_WIDTH - MARGIN_LEFT;
    let plot_h = CHART_HEIGHT - MARGIN_BOTTOM - MARGIN_TOP;
    let slot = plot_w / years.len() as f64;
    let label_every = (years.len() / 15).max(1);

    let mut svg = svg_open("Release year distribution");
    svg.push_str(&y_axis(max_count, plot_h));
    for (i, entry) in years.iter().enumerate() {
        let h = plot_h * entry.count as f64 / max_count as f64;
        let x = MARGIN_LEFT + slot * i as f64;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"#1f77b4\"><title>{}: {}</title></rect>",
            x + slot * 0.1,
            MARGIN_TOP + plot_h - h,
            slot * 0.8,
            h,
            entry.year,
            entry.count
        ));
        if i % label_every == 0 {
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{}</text>",
                x + slot / 2.0,
                CHART_HEIGHT - MARGIN_BOTTOM + 14.0,
                entry.year
            ));
        }
    }
    svg.push_str("</svg>");
    svg
}

/// Contiguous histogram bars with tick labels on every fifth bin edge.
pub fn popularity_chart(histogram: &Histogram) -> String {
    let max_count = histogram.max_count().max(1);
    let plot_w = CHART_WIDTH - MARGIN_LEFT;
    let plot_h = CHART_HEIGHT - MARGIN_BOTTOM - MARGIN_TOP;
    let slot = plot_w / histogram.bins.len().max(1) as f64;

    let mut svg = svg_open("Popularity distribution");
    svg.push_str(&y_axis(max_count, plot_h));
    for (i, bin) in histogram.bins.iter().enumerate() {
        let h = plot_h * bin.count as f64 / max_count as f64;
        let x = MARGIN_LEFT + slot * i as f64;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"skyblue\" stroke=\"#fff\"><title>{:.1} - {:.1}: {}</title></rect>",
            x,
            MARGIN_TOP + plot_h - h,
            slot,
            h,
            bin.start,
            bin.end,
            bin.count
        ));
        if i % 5 == 0 {
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{:.0}</text>",
                x,
                CHART_HEIGHT - MARGIN_BOTTOM + 14.0,
                bin.start
            ));
        }
    }
    if let Some(last) = histogram.bins.last() {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\">{:.0}</text>",
            CHART_WIDTH,
            CHART_HEIGHT - MARGIN_BOTTOM + 14.0,
            last.end
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">Popularity</text>",
        MARGIN_LEFT + plot_w / 2.0,
        CHART_HEIGHT - 4.0
    ));
    svg.push_str("</svg>");
    svg
}

pub fn word_cloud(words: &[WordWeight]) -> String {
    let max_count = words.iter().map(|w| w.count).max().unwrap_or(1).max(1) as f64;
    let mut out = String::from("<div class=\"cloud\">");
    for word in words {
        let size = CLOUD_MIN_PX + (CLOUD_MAX_PX - CLOUD_MIN_PX) * word.count as f64 / max_count;
        out.push_str(&format!(
            "<span style=\"font-size:{:.0}px\" title=\"{}\">{}</span>",
            size,
            word.count,
            escape_html(&word.word)
        ));
    }
    out.push_str("</div>");
    out
}

fn svg_open(label: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{label}\">\
         <line x1=\"{ml}\" y1=\"{mt}\" x2=\"{ml}\" y2=\"{base}\" stroke=\"#999\"/>\
         <line x1=\"{ml}\" y1=\"{base}\" x2=\"{w}\" y2=\"{base}\" stroke=\"#999\"/>",
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        ml = MARGIN_LEFT,
        mt = MARGIN_TOP,
        base = CHART_HEIGHT - MARGIN_BOTTOM,
        label = escape_html(label)
    )
}

fn y_axis(max_count: usize, plot_h: f64) -> String {
    format!(
        "<text x=\"{x:.1}\" y=\"{top:.1}\" font-size=\"10\" text-anchor=\"end\">{max}</text>\
         <text x=\"{x:.1}\" y=\"{bottom:.1}\" font-size=\"10\" text-anchor=\"end\">0</text>",
        x = MARGIN_LEFT - 6.0,
        top = MARGIN_TOP + 4.0,
        bottom = MARGIN_TOP + plot_h,
        max = max_count
    )
}

fn page(title: &str, body: &str, link: Option<&str>) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{style}</style></head>\
         <body><aside><h3>Spotify Playlist Analyzer</h3>\
         <form action=\"/dashboard\" method=\"get\"><label for=\"link\">Enter Spotify Playlist Link:</label>\
         <input id=\"link\" name=\"link\" value=\"{link}\" placeholder=\"https://open.spotify.com/playlist/...\">\
         <button type=\"submit\">Analyze</button></form></aside><main>{body}</main></body></html>",
        title = escape_html(title),
        style = STYLE,
        link = escape_html(link.unwrap_or_default()),
        body = body
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
