use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::genre::Genre;

/// Placeholder genre text for books without any genre tags.
pub const NO_GENRE: &str = "(none)";

/// Identifier shared by the metadata, scores and projection tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookId)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        BookId(id)
    }
}

/// One book placed in the 2D projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub id: BookId,
    pub x: f64,
    pub y: f64,
    pub genre: String,
    pub title: String,
    pub author: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub date: String,
    /// Lowercase, comma separated genre tags
    pub genre: String,
    /// "title - author", used by the title selector
    pub label: String,
}

impl MetadataRecord {
    /// Build a record from raw columns, normalizing the pipe-delimited genre tags.
    #[must_use]
    pub fn new(id: BookId, title: String, author: String, date: String, raw_genre: &str) -> Self {
        let label = format!("{} - {}", title, author);
        Self {
            id,
            title,
            author,
            date,
            genre: normalize_genre(raw_genre),
            label,
        }
    }
}

/// `Detective and Mystery|Crime` becomes `detective and mystery, crime`.
#[must_use]
pub fn normalize_genre(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        NO_GENRE.to_string()
    } else {
        raw.replace('|', ", ").to_lowercase()
    }
}

/// Logistic transform applied to raw log-odds for display.
///
/// The result reads like a probability but is not calibrated; it is only
/// displayed and sorted.
#[inline]
#[must_use]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Per-genre confidence of one book, in genre column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: BookId,
    scores: [f64; Genre::COUNT],
}

impl ScoreRecord {
    /// Convert raw log-odds columns into display confidences.
    #[must_use]
    pub fn from_log_odds(id: BookId, raw: [f64; Genre::COUNT]) -> Self {
        Self {
            id,
            scores: raw.map(logistic),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, genre: Genre) -> f64 {
        self.scores[genre.index()]
    }

    /// Genre/confidence pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Genre, f64)> + '_ {
        Genre::ALL.iter().copied().zip(self.scores.iter().copied())
    }
}

/// A ranked word and its model coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCoefficient(pub String, pub f64);

/// Most discriminative words of a genre, each list sorted by magnitude descending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopWords {
    pub positive: Vec<WordCoefficient>,
    pub negative: Vec<WordCoefficient>,
}

/// Wire shape of a top-words entry: `[[[word, coef], ...], [[word, coef], ...]]`.
#[derive(Debug)]
pub struct WordListPair(pub TopWords);

impl<'de> Deserialize<'de> for WordListPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (positive, negative) =
            <(Vec<WordCoefficient>, Vec<WordCoefficient>)>::deserialize(deserializer)?;
        Ok(WordListPair(TopWords { positive, negative }))
    }
}
