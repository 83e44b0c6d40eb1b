pub mod csv;
pub mod reader;
pub mod xlsx;

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::entities::dataset::{CellValue, ImportBatch, ImportedRow};
use crate::domain::error::ImportError;

/// How repeated header names are turned into row keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateHeaders {
    /// Repeats share one key; the right-most cell's value is kept.
    #[default]
    LastWins,
    /// Repeats become `name_1`, `name_2`, ...
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub duplicate_headers: DuplicateHeaders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("csv") => SheetFormat::Csv,
            _ => SheetFormat::Workbook,
        }
    }
}

pub fn decode_bytes(
    source_name: &str,
    format: SheetFormat,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<ImportBatch, ImportError> {
    let rows = match format {
        SheetFormat::Workbook => self::xlsx::decode_workbook(bytes, options)?,
        SheetFormat::Csv => self::csv::decode_csv(bytes, options)?,
    };
    tracing::debug!(source = source_name, rows = rows.len(), ?format, "decoded sheet");
    ImportBatch::new(source_name, rows)
}

/// Turns raw records into rows keyed by the first record. Blank records are
/// skipped; missing trailing cells become `Empty`.
pub(crate) fn rows_from_records<I>(records: I, options: &DecodeOptions) -> Vec<ImportedRow>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut records = records.into_iter();
    let Some(header_cells) = records.next() else {
        return Vec::new();
    };
    let headers = header_keys(&header_cells, options.duplicate_headers);

    records
        .filter(|cells| !cells.iter().all(CellValue::is_blank))
        .map(|cells| {
            let mut row = ImportedRow::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = cells.get(idx).cloned().unwrap_or(CellValue::Empty);
                row.insert(header.as_str(), value);
            }
            row
        })
        .collect()
}

fn header_keys(cells: &[CellValue], policy: DuplicateHeaders) -> Vec<String> {
    let mut emitted: HashSet<String> = HashSet::new();
    let mut keys = Vec::with_capacity(cells.len());

    for cell in cells {
        let text = cell.to_string();
        let key = if text.is_empty() {
            unique_key("__EMPTY", &emitted)
        } else {
            match policy {
                DuplicateHeaders::LastWins => text,
                DuplicateHeaders::Suffix => unique_key(&text, &emitted),
            }
        };
        emitted.insert(key.clone());
        keys.push(key);
    }
    keys
}

/// `base`, or the first `base_N` not already taken, so a generated name
/// never collides with a literal header to its left.
fn unique_key(base: &str, emitted: &HashSet<String>) -> String {
    if !emitted.contains(base) {
        return base.to_string();
    }
    let mut counter = 1_usize;
    loop {
        let candidate = format!("{base}_{counter}");
        if !emitted.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
