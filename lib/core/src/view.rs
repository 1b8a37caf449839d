//! Render-ready views derived from the [`DataStore`].
//!
//! Every function here is pure: it reads the store and returns a fresh value,
//! so calling it twice with the same input yields the same output.

use serde::{Deserialize, Serialize};

use crate::genre::Genre;
use crate::record::{BookId, WordCoefficient};
use crate::store::DataStore;
use crate::{Error, Result};

/// Confidence at which the chart draws its reference line.
pub const CONFIDENCE_MIDPOINT: f64 = 0.5;

/// Row of the author search table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorBook {
    pub title: String,
    pub date: String,
    pub genre: String,
}

/// Row of the top-words table: the i-th positive and i-th negative word.
///
/// A side is `None` when one list is shorter than the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRow {
    #[serde(rename = "word (+)")]
    pub positive_word: Option<String>,
    #[serde(rename = "coefficient (+)")]
    pub positive_coefficient: Option<f64>,
    #[serde(rename = "word (-)")]
    pub negative_word: Option<String>,
    #[serde(rename = "coefficient (-)")]
    pub negative_coefficient: Option<f64>,
}

/// Column headers of the top-words table, in display order.
pub const WORD_TABLE_COLUMNS: [&str; 4] = ["word (+)", "coefficient (+)", "word (-)", "coefficient (-)"];

/// Column headers of the author table, in display order.
pub const AUTHOR_TABLE_COLUMNS: [&str; 3] = ["title", "date", "genre"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBar {
    pub genre: Genre,
    pub confidence: f64,
}

/// Dotted vertical line drawn behind the bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: String,
    pub width: u32,
    pub dash: String,
    pub layer: String,
}

impl ReferenceLine {
    fn midpoint() -> Self {
        Self {
            x0: CONFIDENCE_MIDPOINT,
            y0: -1.0,
            x1: CONFIDENCE_MIDPOINT,
            y1: Genre::COUNT as f64,
            color: "RoyalBlue".to_string(),
            width: 3,
            dash: "dot".to_string(),
            layer: "below".to_string(),
        }
    }
}

/// Horizontal bar chart of one book's genre confidences, lowest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceChart {
    pub book_id: BookId,
    pub orientation: String,
    pub bars: Vec<ConfidenceBar>,
    pub reference_line: ReferenceLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub id: BookId,
    pub x: f64,
    pub y: f64,
    pub title: String,
    pub author: String,
    pub date: String,
}

/// Points sharing one genre color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub genre: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPlot {
    pub width: u32,
    pub height: u32,
    pub series: Vec<ScatterSeries>,
}

/// Dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption<V> {
    pub label: String,
    pub value: V,
}

/// Books written by `author`, in load order.
///
/// Unknown authors yield an empty table rather than an error.
pub fn author_books(store: &DataStore, author: &str) -> Vec<AuthorBook> {
    store
        .books_by_author(author)
        .map(|r| AuthorBook {
            title: r.title.clone(),
            date: r.date.clone(),
            genre: r.genre.clone(),
        })
        .collect()
}

/// Positive and negative top words of `genre` side by side, at most `max_rows` rows.
pub fn genre_word_table(store: &DataStore, genre: &str, max_rows: usize) -> Result<Vec<WordRow>> {
    let words = genre
        .parse::<Genre>()
        .ok()
        .and_then(|g| store.top_words(g))
        .ok_or_else(|| Error::UnknownGenre(genre.to_string()))?;

    let rows = words.positive.len().max(words.negative.len()).min(max_rows);
    let split = |entry: Option<&WordCoefficient>| match entry {
        Some(WordCoefficient(word, coefficient)) => (Some(word.clone()), Some(round3(*coefficient))),
        None => (None, None),
    };

    Ok((0..rows)
        .map(|i| {
            let (positive_word, positive_coefficient) = split(words.positive.get(i));
            let (negative_word, negative_coefficient) = split(words.negative.get(i));
            WordRow {
                positive_word,
                positive_coefficient,
                negative_word,
                negative_coefficient,
            }
        })
        .collect())
}

/// Genre confidences of a book sorted ascending.
///
/// Ties keep genre column order.
pub fn confidence_series(store: &DataStore, book_id: BookId) -> Result<Vec<(Genre, f64)>> {
    let scores = store.scores(book_id).ok_or(Error::UnknownBookId(book_id))?;
    let mut series: Vec<(Genre, f64)> = scores.iter().collect();
    series.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(series)
}

pub fn confidence_chart(store: &DataStore, book_id: BookId) -> Result<ConfidenceChart> {
    let bars = confidence_series(store, book_id)?
        .into_iter()
        .map(|(genre, confidence)| ConfidenceBar { genre, confidence })
        .collect();
    Ok(ConfidenceChart {
        book_id,
        orientation: "h".to_string(),
        bars,
        reference_line: ReferenceLine::midpoint(),
    })
}

/// Projection grouped into one series per genre, in order of first appearance.
pub fn scatter_plot(store: &DataStore) -> ScatterPlot {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for record in store.projection() {
        let point = ScatterPoint {
            id: record.id,
            x: record.x,
            y: record.y,
            title: record.title.clone(),
            author: record.author.clone(),
            date: record.date.clone(),
        };
        match series.iter_mut().find(|s| s.genre == record.genre) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                genre: record.genre.clone(),
                points: vec![point],
            }),
        }
    }
    ScatterPlot {
        width: 800,
        height: 600,
        series,
    }
}

pub fn author_options(store: &DataStore) -> Vec<SelectOption<String>> {
    store
        .authors()
        .into_iter()
        .map(|a| SelectOption {
            label: a.to_string(),
            value: a.to_string(),
        })
        .collect()
}

/// "title - author" for every scored book, in scores-table order.
pub fn title_options(store: &DataStore) -> Vec<SelectOption<BookId>> {
    store
        .scored_ids()
        .filter_map(|id| {
            store.book(id).map(|r| SelectOption {
                label: r.label.clone(),
                value: id,
            })
        })
        .collect()
}

pub fn genre_options(store: &DataStore) -> Vec<SelectOption<Genre>> {
    store
        .word_genres()
        .map(|g| SelectOption {
            label: g.as_str().to_string(),
            value: g,
        })
        .collect()
}

/// Round to 3 decimals, ties to even.
#[inline]
fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}
