use genrescope_core::LoadError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A tab separated table held in memory.
///
/// The first non-blank line is the header. Every data row must have as many
/// fields as the header, except that a header one field short of the first
/// row gets an unnamed leading index column, as R's `write.table` writes it.
#[derive(Debug)]
pub struct TsvTable {
    path: PathBuf,
    header: Vec<String>,
    rows: Vec<TsvRow>,
}

#[derive(Debug)]
pub struct TsvRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub fields: Vec<String>,
}

impl TsvTable {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn parse<P: AsRef<Path>>(path: P, text: &str) -> Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
            .filter(|(_, l)| !l.trim().is_empty());

        let mut header = match lines.next() {
            Some((_, line)) => split_fields(line),
            None => {
                return Err(LoadError::Malformed {
                    path,
                    line: 1,
                    reason: "file is empty".to_string(),
                })
            }
        };

        let mut rows = Vec::new();
        for (line, text) in lines {
            let fields = split_fields(text);
            if rows.is_empty() && fields.len() == header.len() + 1 {
                header.insert(0, String::new());
            }
            if fields.len() != header.len() {
                return Err(LoadError::Malformed {
                    path,
                    line,
                    reason: format!("expected {} fields, found {}", header.len(), fields.len()),
                });
            }
            rows.push(TsvRow { line, fields });
        }

        Ok(Self { path, header, rows })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[inline]
    pub fn rows(&self) -> &[TsvRow] {
        &self.rows
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Position of the column named `name`.
    pub fn column(&self, name: &str) -> Result<usize, LoadError> {
        self.find_column(name).ok_or_else(|| LoadError::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }

    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Parse field `col` of `row`, reporting the file and line on failure.
    pub fn parse_field<T>(&self, row: &TsvRow, col: usize, what: &str) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = row.fields[col].trim();
        raw.parse().map_err(|e: T::Err| LoadError::Malformed {
            path: self.path.clone(),
            line: row.line,
            reason: format!("invalid {} '{}': {}", what, raw, e),
        })
    }

    /// Parse a numeric field, rejecting NaN and infinities.
    pub fn parse_finite(&self, row: &TsvRow, col: usize, what: &str) -> Result<f64, LoadError> {
        let value: f64 = self.parse_field(row, col, what)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(LoadError::Malformed {
                path: self.path.clone(),
                line: row.line,
                reason: format!("non-finite {} '{}'", what, row.fields[col].trim()),
            })
        }
    }
}

/// Split a line on tabs. A field opening with a double quote runs to its
/// closing quote, so it may hold tabs; `""` inside it is a literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                match c {
                    '"' if chars.next_if_eq(&'"').is_some() => field.push('"'),
                    '"' => break,
                    c => field.push(c),
                }
            }
        }
        loop {
            match chars.next() {
                Some('\t') => break,
                Some(c) => field.push(c),
                None => {
                    fields.push(field);
                    return fields;
                }
            }
        }
        fields.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let text = "docid\ttitle\tauthor\n1\tEmma\tAusten, Jane\r\n\n2\t\"The \"\"Raven\"\"\"\tPoe, Edgar\n";
        let table = TsvTable::parse("meta.tsv", text).unwrap();
        assert_eq!(table.header(), &["docid", "title", "author"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].fields[2], "Austen, Jane");
        assert_eq!(table.rows()[1].line, 4);
        assert_eq!(table.rows()[1].fields[1], "The \"Raven\"");
        assert_eq!(table.column("author").unwrap(), 2);
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let table = TsvTable::parse("t.tsv", "a\tb\tc\n1\t\t\n").unwrap();
        assert_eq!(table.rows()[0].fields, vec!["1", "", ""]);
    }

    #[test]
    fn test_ragged_row() {
        let err = TsvTable::parse("t.tsv", "a\tb\n1\t2\t3\t4\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
        let err = TsvTable::parse("t.tsv", "a\tb\n1\t2\n1\t2\t3\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_header_without_index_name() {
        let table = TsvTable::parse("t.tsv", "V1\tV2\n7\t0.1\t0.2\n8\t0.3\t0.4\n").unwrap();
        assert_eq!(table.header(), &["", "V1", "V2"]);
        assert_eq!(table.rows()[1].fields, vec!["8", "0.3", "0.4"]);
        assert_eq!(table.column("V2").unwrap(), 2);
    }

    #[test]
    fn test_quoted_field_keeps_tab() {
        let table = TsvTable::parse("t.tsv", "id\ttitle\tdate\n1\t\"Tab\there\"\t1900\n").unwrap();
        assert_eq!(table.rows()[0].fields, vec!["1", "Tab\there", "1900"]);
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            TsvTable::parse("t.tsv", "\n\n"),
            Err(LoadError::Malformed { .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let table = TsvTable::parse("t.tsv", "a\tb\n").unwrap();
        assert!(matches!(
            table.column("genre"),
            Err(LoadError::MissingColumn { column, .. }) if column == "genre"
        ));
    }

    #[test]
    fn test_parse_field_reports_line() {
        let table = TsvTable::parse("t.tsv", "x\n0.5\nabc\n").unwrap();
        let ok: f64 = table.parse_field(&table.rows()[0], 0, "x").unwrap();
        assert_eq!(ok, 0.5);
        let err = table.parse_field::<f64>(&table.rows()[1], 0, "x").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_parse_finite_rejects_nan_and_inf() {
        let table = TsvTable::parse("t.tsv", "x\n1e3\nNaN\ninf\n-infinity\n").unwrap();
        assert_eq!(table.parse_finite(&table.rows()[0], 0, "x").unwrap(), 1000.0);
        for (row, line) in table.rows()[1..].iter().zip(3..) {
            let err = table.parse_finite(row, 0, "x").unwrap_err();
            assert!(matches!(err, LoadError::Malformed { line: l, .. } if l == line));
        }
    }
}
