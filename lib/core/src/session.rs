use serde::Serialize;

use crate::binder::{Binding, Refresh, Widget};
use crate::config::{DEFAULT_AUTHOR, DEFAULT_BOOK_ID, DEFAULT_GENRE, DEFAULT_MAX_WORD_ROWS};
use crate::genre::Genre;
use crate::record::BookId;
use crate::store::DataStore;
use crate::view::{self, AuthorBook, ConfidenceChart, WordRow};
use crate::Result;

/// Selection state of one connected client.
///
/// Holds the three selection cells and the content each one currently
/// renders. Sessions never share cells; only the [`DataStore`] is shared.
pub struct Session {
    author: Binding<String, Vec<AuthorBook>>,
    book: Binding<BookId, ConfidenceChart>,
    genre: Binding<Genre, Vec<WordRow>>,
}

/// Owned copy of a session's selections and widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub selected_author: String,
    pub selected_book_id: BookId,
    pub selected_genre: Genre,
    pub author_table: Vec<AuthorBook>,
    pub confidence_chart: ConfidenceChart,
    pub word_table: Vec<WordRow>,
}

#[allow(clippy::ptr_arg)]
fn render_author(store: &DataStore, author: &String) -> Result<Vec<AuthorBook>> {
    Ok(view::author_books(store, author))
}

fn render_confidence(store: &DataStore, id: &BookId) -> Result<ConfidenceChart> {
    view::confidence_chart(store, *id)
}

fn render_words(store: &DataStore, genre: &Genre) -> Result<Vec<WordRow>> {
    view::genre_word_table(store, genre.as_str(), DEFAULT_MAX_WORD_ROWS)
}

impl Session {
    /// Start a session on the default selections.
    ///
    /// Fails when a default book or genre is missing from the loaded data.
    pub fn new(store: &DataStore) -> Result<Self> {
        Self::with_selections(store, DEFAULT_AUTHOR.to_string(), DEFAULT_BOOK_ID, DEFAULT_GENRE)
    }

    pub fn with_selections(
        store: &DataStore,
        author: String,
        book_id: BookId,
        genre: Genre,
    ) -> Result<Self> {
        Ok(Self {
            author: Binding::new(store, Widget::AuthorTable, author, render_author)?,
            book: Binding::new(store, Widget::ConfidenceChart, book_id, render_confidence)?,
            genre: Binding::new(store, Widget::WordTable, genre, render_words)?,
        })
    }

    /// A cleared author control shows an empty table.
    pub fn select_author(&mut self, store: &DataStore, author: Option<&str>) -> Result<&[AuthorBook]> {
        let author = author.unwrap_or_default().to_string();
        self.author.select(store, author).map(Vec::as_slice)
    }

    /// A cleared title control keeps the previous chart.
    pub fn select_book(&mut self, store: &DataStore, book_id: Option<BookId>) -> Result<Refresh> {
        self.book.select_if_present(store, book_id)
    }

    /// Unknown or empty genres are rejected and the table is left as is.
    pub fn select_genre(&mut self, store: &DataStore, genre: Option<&str>) -> Result<&[WordRow]> {
        let genre: Genre = genre.unwrap_or_default().parse()?;
        self.genre.select(store, genre).map(Vec::as_slice)
    }

    pub fn selected_author(&self) -> &str {
        self.author.selection()
    }

    pub fn selected_book_id(&self) -> BookId {
        *self.book.selection()
    }

    pub fn selected_genre(&self) -> Genre {
        *self.genre.selection()
    }

    pub fn author_table(&self) -> &[AuthorBook] {
        self.author.displayed()
    }

    pub fn confidence_chart(&self) -> &ConfidenceChart {
        self.book.displayed()
    }

    pub fn word_table(&self) -> &[WordRow] {
        self.genre.displayed()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selected_author: self.selected_author().to_string(),
            selected_book_id: self.selected_book_id(),
            selected_genre: self.selected_genre(),
            author_table: self.author_table().to_vec(),
            confidence_chart: self.confidence_chart().clone(),
            word_table: self.word_table().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MetadataRecord, ScoreRecord, TopWords, WordCoefficient};
    use crate::Error;

    fn store() -> DataStore {
        let metadata = vec![
            MetadataRecord::new(DEFAULT_BOOK_ID, "The Big Sleep".into(), DEFAULT_AUTHOR.into(), "1939".into(), "Detective and Mystery"),
            MetadataRecord::new(BookId(7), "Ben-Hur".into(), "Wallace, Lew".into(), "1880".into(), "Historical|Religious"),
        ];
        let mut raw = [-1.0; Genre::COUNT];
        raw[Genre::DetectiveAndMystery.index()] = 2.5;
        let scores = vec![
            ScoreRecord::from_log_odds(DEFAULT_BOOK_ID, raw),
            ScoreRecord::from_log_odds(BookId(7), [0.3; Genre::COUNT]),
        ];
        let words = |w: &str| TopWords {
            positive: vec![WordCoefficient(w.to_string(), 0.5)],
            negative: vec![WordCoefficient("the".to_string(), -0.1)],
        };
        DataStore::new(
            Vec::new(),
            metadata,
            scores,
            vec![
                (Genre::DetectiveAndMystery, words("murder")),
                (Genre::Historical, words("chariot")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let store = store();
        let session = Session::new(&store).unwrap();
        assert_eq!(session.selected_author(), DEFAULT_AUTHOR);
        assert_eq!(session.author_table().len(), 1);
        assert_eq!(session.confidence_chart().book_id, DEFAULT_BOOK_ID);
        assert_eq!(
            session.confidence_chart().bars.last().unwrap().genre,
            Genre::DetectiveAndMystery
        );
        assert_eq!(session.word_table()[0].positive_word.as_deref(), Some("murder"));
    }

    #[test]
    fn test_missing_default_is_fatal() {
        let store = DataStore::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(matches!(Session::new(&store), Err(Error::UnknownBookId(_))));
    }

    #[test]
    fn test_cells_are_independent() {
        let store = store();
        let mut session = Session::new(&store).unwrap();
        let before = session.snapshot();

        session.select_author(&store, Some("Wallace, Lew")).unwrap();
        assert_eq!(session.author_table()[0].title, "Ben-Hur");
        assert_eq!(session.confidence_chart(), &before.confidence_chart);
        assert_eq!(session.word_table(), before.word_table.as_slice());
    }

    #[test]
    fn test_cleared_author_shows_empty_table() {
        let store = store();
        let mut session = Session::new(&store).unwrap();
        assert!(session.select_author(&store, None).unwrap().is_empty());
        assert_eq!(session.selected_author(), "");
    }

    #[test]
    fn test_null_book_keeps_chart() {
        let store = store();
        let mut session = Session::new(&store).unwrap();
        assert_eq!(session.select_book(&store, Some(BookId(7))).unwrap(), Refresh::Recomputed);
        let shown = session.confidence_chart().clone();
        assert_eq!(session.select_book(&store, None).unwrap(), Refresh::Skipped);
        assert_eq!(session.confidence_chart(), &shown);
        assert_eq!(session.selected_book_id(), BookId(7));
    }

    #[test]
    fn test_unknown_book_keeps_chart() {
        let store = store();
        let mut session = Session::new(&store).unwrap();
        let shown = session.confidence_chart().clone();
        assert!(session.select_book(&store, Some(BookId(404))).is_err());
        assert_eq!(session.confidence_chart(), &shown);
    }

    #[test]
    fn test_unknown_genre_keeps_table() {
        let store = store();
        let mut session = Session::new(&store).unwrap();
        let rows = session.select_genre(&store, Some("historical")).unwrap();
        assert_eq!(rows[0].positive_word.as_deref(), Some("chariot"));

        assert!(matches!(session.select_genre(&store, Some("horror")), Err(Error::UnknownGenre(_))));
        assert!(matches!(session.select_genre(&store, None), Err(Error::UnknownGenre(_))));
        assert_eq!(session.selected_genre(), Genre::Historical);
        assert_eq!(session.word_table()[0].positive_word.as_deref(), Some("chariot"));
    }
}
