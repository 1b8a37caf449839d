use genrescope_core::{
    BookId, DataFiles, DataStore, Genre, LoadError, MetadataRecord, ProjectionRecord,
    ScoreRecord, TopWords, WordListPair,
};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::tsv::{TsvRow, TsvTable};

/// Column names of the projection table, besides its identifier.
const PROJECTION_COLUMNS: [&str; 6] = ["x", "y", "genre", "title", "author", "date"];

/// Read all four datasets and assemble the store.
///
/// Any missing or malformed file, or metadata and scores covering different
/// books, aborts the load.
pub fn load(files: &DataFiles) -> Result<DataStore, LoadError> {
    let projection = load_projection(&files.projection)?;
    let metadata = load_metadata(&files.metadata)?;
    let scores = load_scores(&files.scores)?;
    let top_words = load_top_words(&files.top_words)?;

    info!(
        projection = projection.len(),
        books = metadata.len(),
        scored = scores.len(),
        genres = top_words.len(),
        "Datasets loaded"
    );

    DataStore::new(projection, metadata, scores, top_words)
}

pub fn load_projection(path: &Path) -> Result<Vec<ProjectionRecord>, LoadError> {
    let table = TsvTable::read(path)?;
    let [x, y, genre, title, author, date] = PROJECTION_COLUMNS.map(|c| table.column(c));
    let (x, y, genre, title, author, date) = (x?, y?, genre?, title?, author?, date?);
    let id = projection_id_column(&table)?;

    let records = table
        .rows()
        .iter()
        .map(|row| {
            Ok(ProjectionRecord {
                id: table.parse_field(row, id, "id")?,
                x: table.parse_finite(row, x, "x")?,
                y: table.parse_finite(row, y, "y")?,
                genre: row.fields[genre].clone(),
                title: row.fields[title].clone(),
                author: row.fields[author].clone(),
                date: row.fields[date].trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    debug!(path = ?path, rows = records.len(), "Projection loaded");
    Ok(records)
}

/// `id` or `docid` if present, else the first column that is not a data column.
fn projection_id_column(table: &TsvTable) -> Result<usize, LoadError> {
    table
        .find_column("id")
        .or_else(|| table.find_column("docid"))
        .or_else(|| {
            table
                .header()
                .iter()
                .position(|h| !PROJECTION_COLUMNS.contains(&h.trim()))
        })
        .ok_or_else(|| LoadError::MissingColumn {
            path: table.path().to_path_buf(),
            column: "id".to_string(),
        })
}

/// Metadata keyed by its first column, with genre tags normalized.
pub fn load_metadata(path: &Path) -> Result<Vec<MetadataRecord>, LoadError> {
    let table = TsvTable::read(path)?;
    let title = table.column("title")?;
    let author = table.column("author")?;
    let date = table.column("date")?;
    let genre = table.column("genre")?;

    let mut seen = HashSet::new();
    let records = table
        .rows()
        .iter()
        .map(|row| {
            Ok(MetadataRecord::new(
                unique_id(&table, row, &mut seen)?,
                row.fields[title].clone(),
                row.fields[author].clone(),
                row.fields[date].trim().to_string(),
                &row.fields[genre],
            ))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    debug!(path = ?path, rows = records.len(), "Metadata loaded");
    Ok(records)
}

/// Scores keyed by their first column; the remaining twelve columns map to
/// [`Genre::ALL`] by position and their headers are ignored, so the header
/// may leave the id column unnamed.
pub fn load_scores(path: &Path) -> Result<Vec<ScoreRecord>, LoadError> {
    let table = TsvTable::read(path)?;
    let header_only = table.rows().is_empty() && table.width() == Genre::COUNT;
    if table.width() != Genre::COUNT + 1 && !header_only {
        return Err(LoadError::Malformed {
            path: path.to_path_buf(),
            line: 1,
            reason: format!(
                "expected an id column and {} score columns, found {} columns",
                Genre::COUNT,
                table.width()
            ),
        });
    }

    let mut seen = HashSet::new();
    let records = table
        .rows()
        .iter()
        .map(|row| {
            let id = unique_id(&table, row, &mut seen)?;
            let mut raw = [0.0; Genre::COUNT];
            for (genre, value) in Genre::ALL.iter().zip(raw.iter_mut()) {
                *value = table.parse_finite(row, genre.index() + 1, genre.as_str())?;
            }
            Ok(ScoreRecord::from_log_odds(id, raw))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    debug!(path = ?path, rows = records.len(), "Scores loaded");
    Ok(records)
}

/// The id in the first column of `row`, which must not repeat an earlier row.
fn unique_id(
    table: &TsvTable,
    row: &TsvRow,
    seen: &mut HashSet<BookId>,
) -> Result<BookId, LoadError> {
    let id: BookId = table.parse_field(row, 0, "id")?;
    if seen.insert(id) {
        Ok(id)
    } else {
        Err(LoadError::DuplicateId {
            path: table.path().to_path_buf(),
            line: row.line,
            id,
        })
    }
}

/// Top-words entries in file order.
pub fn load_top_words(path: &Path) -> Result<Vec<(Genre, TopWords)>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let TopWordsFile(entries) = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let words = entries
        .into_iter()
        .map(|(key, WordListPair(words))| {
            key.parse::<Genre>()
                .map(|genre| (genre, words))
                .map_err(|_| LoadError::UnknownGenreKey {
                    path: path.to_path_buf(),
                    genre: key,
                })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    debug!(path = ?path, genres = words.len(), "Top words loaded");
    Ok(words)
}

/// The top-words object, keeping key order as written.
struct TopWordsFile(Vec<(String, WordListPair)>);

impl<'de> Deserialize<'de> for TopWordsFile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TopWordsFile;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping genre names to word lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(Genre::COUNT));
                while let Some(entry) = map.next_entry::<String, WordListPair>()? {
                    entries.push(entry);
                }
                Ok(TopWordsFile(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
