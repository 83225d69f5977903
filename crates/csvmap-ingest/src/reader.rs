use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use csvmap_model::{Column, CsvEncoding, Row};
use encoding_rs::{SHIFT_JIS, UTF_8};
use tracing::{info, warn};

use crate::error::{IngestError, Result};

/// Columns and rows read from a delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedTable {
    /// One source column per distinct header, in file order.
    pub columns: Vec<Column>,
    /// Rows keyed by source column id. Every row has every column.
    pub rows: Vec<Row>,
    /// Encoding the bytes were decoded with.
    pub encoding: CsvEncoding,
}

impl ImportedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Guess the encoding of raw bytes: UTF-8 if they decode cleanly, else Shift_JIS.
pub fn detect_encoding(bytes: &[u8]) -> CsvEncoding {
    if std::str::from_utf8(bytes).is_ok() {
        CsvEncoding::Utf8
    } else {
        CsvEncoding::ShiftJis
    }
}

/// Decode bytes to text, dropping a leading byte order mark.
///
/// Malformed sequences become U+FFFD.
pub fn decode(bytes: &[u8], encoding: CsvEncoding) -> String {
    let codec = match encoding {
        CsvEncoding::Utf8 => UTF_8,
        CsvEncoding::ShiftJis => SHIFT_JIS,
    };
    let (text, used, had_errors) = codec.decode(bytes);
    if had_errors {
        warn!(
            encoding = used.name(),
            "input contains byte sequences that are invalid in the selected encoding"
        );
    }
    text.trim_start_matches('\u{feff}').to_string()
}

/// Read a CSV file.
///
/// With no encoding given, it is detected from the bytes.
pub fn read_csv_path(path: &Path, encoding: Option<CsvEncoding>) -> Result<ImportedTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv_bytes(&bytes, encoding)?;
    info!(
        path = %path.display(),
        encoding = %table.encoding,
        columns = table.columns.len(),
        rows = table.rows.len(),
        "imported CSV"
    );
    Ok(table)
}

/// Parse CSV bytes. The first record is the header row.
pub fn read_csv_bytes(bytes: &[u8], encoding: Option<CsvEncoding>) -> Result<ImportedTable> {
    let encoding = encoding.unwrap_or_else(|| detect_encoding(bytes));
    let text = decode(bytes, encoding);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(IngestError::CsvParse)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader);
    }

    // Repeated headers share an id; the first occurrence supplies the value.
    let mut seen = HashSet::new();
    let mut slots = Vec::with_capacity(headers.len());
    let mut columns = Vec::with_capacity(headers.len());
    for (position, header) in headers.iter().enumerate() {
        if seen.insert(header.as_str()) {
            let column = Column::source(header.as_str());
            slots.push((position, column.id.clone()));
            columns.push(column);
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(IngestError::CsvParse)?;
        let row: Row = slots
            .iter()
            .map(|(position, id)| (id.clone(), record.get(*position).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ImportedTable {
        columns,
        rows,
        encoding,
    })
}
