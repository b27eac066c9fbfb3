use crate::sources::error::SourceError;
use crate::sources::{RawSource, SourceEncoding};
use log::info;
use polars::prelude::*;
use std::io::Cursor;

/// A decoded CSV source where every column is kept as text.
///
/// Coercion is left to the normalizers so that each field can apply its own
/// locale and unmapped-value policy.
#[derive(Debug, Clone)]
pub struct RawTable {
    label: String,
    frame: DataFrame,
}

/// A borrowed text column; blank cells read as `None`.
#[derive(Clone, Copy)]
pub struct TextColumn<'a> {
    values: &'a StringChunked,
}

impl<'a> TextColumn<'a> {
    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.values.get(idx)
    }

    /// Like [`TextColumn::get`] but blank cells read as `""`.
    pub fn text(&self, idx: usize) -> &'a str {
        self.get(idx).unwrap_or("")
    }
}

impl RawTable {
    /// Parses CSV bytes with a header row. No type inference is done.
    pub fn from_source(source: &RawSource) -> Result<Self, SourceError> {
        let bytes = match source.encoding {
            SourceEncoding::Utf8 => source.bytes.clone(),
            // Widen byte-for-char, exactly as a latin-1 reader would.
            SourceEncoding::Latin1 => source
                .bytes
                .iter()
                .map(|&b| char::from(b))
                .collect::<String>()
                .into_bytes(),
        };

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|e| SourceError::CsvRead {
                source_label: source.label.clone(),
                source: e,
            })?;

        info!(
            "Decoded source {} ({} rows, {} columns)",
            source.label,
            frame.height(),
            frame.width()
        );
        Ok(Self {
            label: source.label.clone(),
            frame,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    fn find_column(&self, name: &str) -> Option<&Column> {
        self.frame
            .get_columns()
            .iter()
            .find(|c| c.name().as_str().trim() == name)
    }

    fn as_text<'a>(&self, name: &str, column: &'a Column) -> Result<TextColumn<'a>, SourceError> {
        column
            .str()
            .map(|values| TextColumn { values })
            .map_err(|e| SourceError::ColumnType {
                source_label: self.label.clone(),
                column: name.to_string(),
                source: e,
            })
    }

    /// Header names are compared after trimming.
    pub fn text_column(&self, name: &str) -> Result<TextColumn<'_>, SourceError> {
        let column = self
            .find_column(name)
            .ok_or_else(|| SourceError::MissingColumn {
                source_label: self.label.clone(),
                column: name.to_string(),
            })?;
        self.as_text(name, column)
    }

    pub fn optional_text_column(&self, name: &str) -> Result<Option<TextColumn<'_>>, SourceError> {
        self.find_column(name)
            .map(|column| self.as_text(name, column))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_every_column_as_text() -> Result<(), Box<dyn std::error::Error>> {
        let source = RawSource::utf8("inline", "a,b\n1,x\n,2\n");
        let table = RawTable::from_source(&source)?;
        assert_eq!(table.height(), 2);
        let a = table.text_column("a")?;
        assert_eq!(a.get(0), Some("1"));
        assert_eq!(a.get(1), None);
        assert_eq!(a.text(1), "");
        assert_eq!(table.text_column("b")?.get(1), Some("2"));
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let table = RawTable::from_source(&RawSource::utf8("inline", "a\n1\n"))?;
        match table.text_column("b") {
            Err(SourceError::MissingColumn { column, source_label }) => {
                assert_eq!(column, "b");
                assert_eq!(source_label, "inline");
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        assert!(table.optional_text_column("b")?.is_none());
        Ok(())
    }

    #[test]
    fn test_latin1_bytes_are_widened() -> Result<(), Box<dyn std::error::Error>> {
        // "Araçoiaba" stored as UTF-8 bytes but read as latin-1.
        let mut bytes = b"name\n".to_vec();
        bytes.extend_from_slice("Araçoiaba\n".as_bytes());
        let source = RawSource::new("inline", bytes, SourceEncoding::Latin1);
        let table = RawTable::from_source(&source)?;
        assert_eq!(table.text_column("name")?.get(0), Some("AraÃ§oiaba"));
        Ok(())
    }
}
