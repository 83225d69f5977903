use std::path::Path;

use csv::{Terminator, WriterBuilder};
use csvmap_model::{Column, Row, cell_value};
use tracing::info;

use crate::error::{IngestError, Result};

/// UTF-8 byte order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prefix the output with a UTF-8 byte order mark.
    pub bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

impl ExportOptions {
    pub fn without_bom() -> Self {
        Self { bom: false }
    }
}

/// Serialize rows as CSV text: a header of column names, then one field per column.
pub fn write_csv_string(rows: &[Row], columns: &[Column]) -> Result<String> {
    let bytes = serialize(rows, columns)?;
    String::from_utf8(bytes).map_err(|_| IngestError::InvalidOutput)
}

/// Serialize rows to bytes, with the byte order mark if requested.
pub fn write_csv_bytes(rows: &[Row], columns: &[Column], options: ExportOptions) -> Result<Vec<u8>> {
    let body = serialize(rows, columns)?;
    if !options.bom {
        return Ok(body);
    }
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Write rows to a CSV file.
pub fn write_csv_path(
    path: &Path,
    rows: &[Row],
    columns: &[Column],
    options: ExportOptions,
) -> Result<()> {
    let bytes = write_csv_bytes(rows, columns, options)?;
    std::fs::write(path, bytes).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        bom = options.bom,
        "exported CSV"
    );
    Ok(())
}

fn serialize(rows: &[Row], columns: &[Column]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer
        .write_record(columns.iter().map(|column| column.name.as_str()))
        .map_err(IngestError::CsvWrite)?;
    for row in rows {
        writer
            .write_record(columns.iter().map(|column| cell_value(row, &column.id)))
            .map_err(IngestError::CsvWrite)?;
    }
    writer
        .into_inner()
        .map_err(|error| IngestError::CsvWrite(error.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_are_written_empty() {
        let columns = vec![Column::new("target_a", "A"), Column::new("target_b", "B")];
        let rows = vec![Row::from([("target_a".to_string(), "1".to_string())])];
        let text = write_csv_string(&rows, &columns).expect("serialize");
        assert_eq!(text, "A,B\r\n1,\r\n");
    }

    #[test]
    fn bom_is_optional() {
        let columns = vec![Column::new("target_a", "A")];
        let with_bom = write_csv_bytes(&[], &columns, ExportOptions::default()).expect("bytes");
        assert!(with_bom.starts_with(UTF8_BOM));
        let without = write_csv_bytes(&[], &columns, ExportOptions::without_bom()).expect("bytes");
        assert_eq!(without, b"A\r\n");
    }
}
