//! # Dashboard Module
//!
//! Turns a [`TrackTable`] and its [`PlaylistMetadata`] into the data behind
//! every panel of the dashboard, in display order:
//!
//! 1. metadata summary
//! 2. the track table itself
//! 3. number of tracks per release year, years ascending
//! 4. popularity histogram with 20 equal-width bins
//! 5. genre word cloud, absent when the playlist carries no genre text
//!
//! Building a [`Dashboard`] is pure. The [`html`] submodule renders it for the
//! browser, `cli::show` renders it for the terminal.

pub mod html;

use std::collections::{BTreeMap, HashMap};

use crate::{
    management::TrackTable,
    types::{PlaylistMetadata, TrackRow},
    utils,
};

pub const HISTOGRAM_BINS: usize = 20;
pub const MAX_CLOUD_WORDS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub name: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub followers: u64,
    pub total_tracks: u64,
    pub total_duration: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Number of values spread over the bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub summary: Summary,
    pub rows: Vec<TrackRow>,
    pub release_years: Vec<YearCount>,
    pub popularity: Histogram,
    pub word_cloud: Option<Vec<WordWeight>>,
}

impl Dashboard {
    pub fn build(metadata: &PlaylistMetadata, table: &TrackTable) -> Self {
        let popularity: Vec<f64> = table.popularity().into_iter().map(f64::from).collect();
        let words = word_frequencies(&table.genre_text());

        Self {
            summary: summarize(metadata, Some(table)),
            rows: table.rows().to_vec(),
            release_years: year_counts(&table.release_years()),
            popularity: histogram(&popularity, HISTOGRAM_BINS),
            word_cloud: (!words.is_empty()).then_some(words),
        }
    }
}

pub fn summarize(metadata: &PlaylistMetadata, table: Option<&TrackTable>) -> Summary {
    let total_ms = table.map(TrackTable::total_duration_ms).unwrap_or(0);

    Summary {
        name: metadata.name.clone(),
        description: metadata.description_or_default().to_string(),
        thumbnail: metadata.thumbnail.clone(),
        followers: metadata.followers,
        total_tracks: metadata.total_tracks,
        total_duration: (total_ms > 0).then(|| utils::format_duration(total_ms)),
    }
}

/// Counts tracks per release year, sorted by year.
pub fn year_counts(years: &[i32]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years {
        *counts.entry(*year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Splits `values` into `bins` equal-width bins spanning their range.
///
/// When all values are equal the range is widened to value ± 0.5, an empty
/// input spans 0..1. The last bin includes its right edge.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    if values.is_empty() {
        min = 0.0;
        max = 1.0;
    } else if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }

    Histogram { bins: result }
}

/// Filler words never shown in the word cloud.
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "an", "and", "any", "are", "as", "at", "be",
    "but", "by", "for", "from", "has", "have", "he", "her", "his", "in", "into", "is", "it",
    "its", "me", "my", "no", "not", "of", "off", "on", "or", "our", "out", "she", "so",
    "than", "that", "the", "their", "them", "then", "there", "they", "this", "to", "too",
    "up", "was", "we", "were", "what", "when", "with", "you", "your",
];

/// Word frequencies over a genre text, most frequent first.
///
/// A word is a run of letters, digits, `_` and `'` starting with a non-`'`
/// character, at least two characters long. Hyphens split words, so "k-pop"
/// counts as "pop". Words are lowercased, a trailing `'s` is dropped, and
/// stopwords and plain numbers are skipped.
pub fn word_frequencies(text: &str) -> Vec<WordWeight> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\'')) {
        let lowered = token.trim_start_matches('\'').to_lowercase();
        let word = lowered.strip_suffix("'s").unwrap_or(&lowered);
        if word.chars().count() < 2
            || STOPWORDS.contains(&word)
            || word.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    let mut words: Vec<WordWeight> = counts
        .into_iter()
        .map(|(word, count)| WordWeight { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(MAX_CLOUD_WORDS);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_are_sorted_ascending() {
        let counts = year_counts(&[2020, 1999, 2020, 2005]);
        assert_eq!(
            counts,
            vec![
                YearCount { year: 1999, count: 1 },
                YearCount { year: 2005, count: 1 },
                YearCount { year: 2020, count: 2 },
            ]
        );
    }

    #[test]
    fn histogram_has_fixed_bins_and_keeps_every_value() {
        let values = [0.0, 10.0, 50.0, 99.0, 100.0];
        let hist = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(hist.bins.len(), 20);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[2].count, 1);
        assert_eq!(hist.bins[10].count, 1);
        // 99 and the closed right edge at 100 both land in the last bin
        assert_eq!(hist.bins[19].count, 2);
        assert_eq!(hist.bins[19].end, 100.0);
    }

    #[test]
    fn histogram_of_identical_values_spans_one_unit() {
        let hist = histogram(&[42.0, 42.0], HISTOGRAM_BINS);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.bins[0].start, 41.5);
        assert_eq!(hist.bins[19].end, 42.5);
        assert_eq!(hist.bins[10].count, 2);
    }

    #[test]
    fn empty_histogram_is_all_zero() {
        let hist = histogram(&[], HISTOGRAM_BINS);
        assert_eq!(hist.bins.len(), 20);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn word_frequencies_count_across_rows() {
        let words = word_frequencies("indie pop, dream pop pop, K-Pop");
        assert_eq!(words[0], WordWeight { word: "pop".to_string(), count: 4 });
        assert!(words.iter().any(|w| w.word == "indie"));
        assert!(!words.iter().any(|w| w.word == "k" || w.word == "k-pop"));
    }

    #[test]
    fn word_frequencies_skip_filler_words_and_numbers() {
        let words = word_frequencies("drum and bass, the 1975, rock, artist's");
        let found: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert!(found.contains(&"drum"));
        assert!(found.contains(&"bass"));
        assert!(found.contains(&"rock"));
        assert!(found.contains(&"artist"));
        assert!(!found.contains(&"and"));
        assert!(!found.contains(&"the"));
        assert!(!found.contains(&"1975"));
    }

    #[test]
    fn word_frequencies_of_blank_text_is_empty() {
        assert!(word_frequencies("  , ").is_empty());
    }
}
