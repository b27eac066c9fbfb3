use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read source file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    // Errors while decoding the CSV text into a frame
    #[error("Parsing error processing CSV data for source '{source_label}'")]
    CsvRead {
        source_label: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in source '{source_label}'")]
    MissingColumn {
        source_label: String,
        column: String,
    },

    #[error("Column '{column}' in source '{source_label}' is not text")]
    ColumnType {
        source_label: String,
        column: String,
        #[source]
        source: PolarsError,
    },
}
