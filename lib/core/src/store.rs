use ahash::{AHashMap, AHashSet};

use crate::error::LoadError;
use crate::genre::Genre;
use crate::record::{BookId, MetadataRecord, ProjectionRecord, ScoreRecord, TopWords};

/// The four analysis tables, loaded once and read-only afterwards.
///
/// Built through [`DataStore::new`], which enforces that the metadata and
/// scores tables cover exactly the same books. Nothing hands out mutable
/// access, so a store can be shared behind an `Arc` by every session.
#[derive(Debug)]
pub struct DataStore {
    projection: Vec<ProjectionRecord>,
    metadata: Vec<MetadataRecord>,
    metadata_index: AHashMap<BookId, usize>,
    scores: Vec<ScoreRecord>,
    score_index: AHashMap<BookId, usize>,
    /// Kept in file order, which drives the genre selector
    top_words: Vec<(Genre, TopWords)>,
}

impl DataStore {
    pub fn new(
        projection: Vec<ProjectionRecord>,
        metadata: Vec<MetadataRecord>,
        scores: Vec<ScoreRecord>,
        top_words: Vec<(Genre, TopWords)>,
    ) -> Result<Self, LoadError> {
        let metadata_index = index_ids("metadata", metadata.iter().map(|r| r.id))?;
        let score_index = index_ids("scores", scores.iter().map(|r| r.id))?;

        let mut missing_scores: Vec<BookId> = metadata_index
            .keys()
            .filter(|id| !score_index.contains_key(*id))
            .copied()
            .collect();
        let mut missing_metadata: Vec<BookId> = score_index
            .keys()
            .filter(|id| !metadata_index.contains_key(*id))
            .copied()
            .collect();
        if !missing_scores.is_empty() || !missing_metadata.is_empty() {
            missing_scores.sort_unstable();
            missing_metadata.sort_unstable();
            return Err(LoadError::KeyMismatch {
                missing_scores,
                missing_metadata,
            });
        }

        let mut seen = AHashSet::new();
        let top_words = top_words
            .into_iter()
            .filter(|(genre, _)| seen.insert(*genre))
            .collect();

        Ok(Self {
            projection,
            metadata,
            metadata_index,
            scores,
            score_index,
            top_words,
        })
    }

    #[inline]
    #[must_use]
    pub fn projection(&self) -> &[ProjectionRecord] {
        &self.projection
    }

    /// Metadata rows in load order.
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &[MetadataRecord] {
        &self.metadata
    }

    #[inline]
    pub fn book(&self, id: BookId) -> Option<&MetadataRecord> {
        self.metadata_index.get(&id).map(|&i| &self.metadata[i])
    }

    /// Books whose author field equals `author` exactly, in load order.
    pub fn books_by_author<'a>(
        &'a self,
        author: &'a str,
    ) -> impl Iterator<Item = &'a MetadataRecord> + 'a {
        self.metadata.iter().filter(move |r| r.author == author)
    }

    /// Distinct authors in order of first appearance.
    #[must_use]
    pub fn authors(&self) -> Vec<&str> {
        let mut seen = AHashSet::new();
        self.metadata
            .iter()
            .map(|r| r.author.as_str())
            .filter(|a| seen.insert(*a))
            .collect()
    }

    #[inline]
    pub fn scores(&self, id: BookId) -> Option<&ScoreRecord> {
        self.score_index.get(&id).map(|&i| &self.scores[i])
    }

    /// Book ids in scores-table order.
    pub fn scored_ids(&self) -> impl Iterator<Item = BookId> + '_ {
        self.scores.iter().map(|r| r.id)
    }

    pub fn top_words(&self, genre: Genre) -> Option<&TopWords> {
        self.top_words
            .iter()
            .find(|(g, _)| *g == genre)
            .map(|(_, words)| words)
    }

    /// Genres with a top-words entry, in file order.
    pub fn word_genres(&self) -> impl Iterator<Item = Genre> + '_ {
        self.top_words.iter().map(|(g, _)| *g)
    }

    #[inline]
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.metadata.len()
    }
}

fn index_ids(
    table: &'static str,
    ids: impl Iterator<Item = BookId>,
) -> Result<AHashMap<BookId, usize>, LoadError> {
    let mut index = AHashMap::new();
    for (i, id) in ids.enumerate() {
        if index.insert(id, i).is_some() {
            return Err(LoadError::DuplicateRecord { table, id });
        }
    }
    Ok(index)
}
