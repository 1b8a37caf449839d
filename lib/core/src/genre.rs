//! The fixed set of genres scored by the classifier.
//!
//! Declaration order is the column order of the scores table and must not
//! change: score files carry unlabeled columns that are mapped positionally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "adventure")]
    Adventure,
    #[serde(rename = "detective and mystery")]
    DetectiveAndMystery,
    #[serde(rename = "domestic")]
    Domestic,
    #[serde(rename = "fantasy")]
    Fantasy,
    #[serde(rename = "historical")]
    Historical,
    #[serde(rename = "horror")]
    Horror,
    #[serde(rename = "political")]
    Political,
    #[serde(rename = "religious")]
    Religious,
    #[serde(rename = "romance")]
    Romance,
    #[serde(rename = "science fiction")]
    ScienceFiction,
    #[serde(rename = "war stories")]
    WarStories,
    #[serde(rename = "westerns")]
    Westerns,
}

impl Genre {
    pub const COUNT: usize = 12;

    /// All genres in score-column order.
    pub const ALL: [Genre; Genre::COUNT] = [
        Genre::Adventure,
        Genre::DetectiveAndMystery,
        Genre::Domestic,
        Genre::Fantasy,
        Genre::Historical,
        Genre::Horror,
        Genre::Political,
        Genre::Religious,
        Genre::Romance,
        Genre::ScienceFiction,
        Genre::WarStories,
        Genre::Westerns,
    ];

    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Adventure => "adventure",
            Genre::DetectiveAndMystery => "detective and mystery",
            Genre::Domestic => "domestic",
            Genre::Fantasy => "fantasy",
            Genre::Historical => "historical",
            Genre::Horror => "horror",
            Genre::Political => "political",
            Genre::Religious => "religious",
            Genre::Romance => "romance",
            Genre::ScienceFiction => "science fiction",
            Genre::WarStories => "war stories",
            Genre::Westerns => "westerns",
        }
    }

    /// Position of this genre in the scores table.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::UnknownGenre(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order() {
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.index(), i);
        }
        assert_eq!(Genre::ALL[1].as_str(), "detective and mystery");
        assert_eq!(Genre::ALL[11].as_str(), "westerns");
    }

    #[test]
    fn test_parse() {
        assert_eq!("science fiction".parse::<Genre>().unwrap(), Genre::ScienceFiction);
        assert!(matches!("Science Fiction".parse::<Genre>(), Err(Error::UnknownGenre(_))));
        assert!("".parse::<Genre>().is_err());
    }

    #[test]
    fn test_serde_uses_literal_names() {
        let json = serde_json::to_string(&Genre::WarStories).unwrap();
        assert_eq!(json, "\"war stories\"");
        let parsed: Genre = serde_json::from_str("\"detective and mystery\"").unwrap();
        assert_eq!(parsed, Genre::DetectiveAndMystery);
    }
}
