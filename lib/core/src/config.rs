use std::path::{Path, PathBuf};

use crate::genre::Genre;
use crate::record::BookId;

/// Default selections shown to a fresh session.
pub const DEFAULT_AUTHOR: &str = "Chandler, Raymond";
pub const DEFAULT_BOOK_ID: BookId = BookId(10889);
pub const DEFAULT_GENRE: Genre = Genre::DetectiveAndMystery;

/// Rows shown in the top-words table.
pub const DEFAULT_MAX_WORD_ROWS: usize = 15;

/// Locations of the four static datasets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub projection: PathBuf,
    pub metadata: PathBuf,
    pub scores: PathBuf,
    pub top_words: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

impl DataFiles {
    /// Default file names resolved under `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            projection: dir.join("tsne_data.csv"),
            metadata: dir.join("metadata.tsv"),
            scores: dir.join("scores.tsv"),
            top_words: dir.join("top_100_words.json"),
        }
    }
}
