use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::domain::error::ImportError;

/// A decoded spreadsheet cell. Numbers and dates keep their native type;
/// conversion to text only happens through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(v) => v.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::DateTime(v) => {
                if v.hour() == 0 && v.minute() == 0 && v.second() == 0 {
                    write!(f, "{}", v.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(v) => serializer.serialize_str(v),
            CellValue::Number(v) => serializer.serialize_f64(*v),
            CellValue::Bool(v) => serializer.serialize_bool(*v),
            CellValue::DateTime(v) => {
                serializer.serialize_str(&v.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
        }
    }
}

/// One data row keyed by column name, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedRow {
    cells: Vec<(String, CellValue)>,
}

impl ImportedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`. An existing column keeps its position and
    /// the previous value is returned.
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) -> Option<CellValue> {
        let column = column.into();
        match self.cells.iter_mut().find(|(key, _)| *key == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.cells.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(key, _)| key.as_str())
    }

}

impl<K: Into<String>> FromIterator<(K, CellValue)> for ImportedRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = ImportedRow::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for ImportedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The decoded first sheet of one selected file. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBatch {
    source_name: String,
    rows: Vec<ImportedRow>,
}

impl ImportBatch {
    pub fn new(source_name: impl Into<String>, rows: Vec<ImportedRow>) -> Result<Self, ImportError> {
        if rows.is_empty() {
            return Err(ImportError::EmptyDataset);
        }
        Ok(Self {
            source_name: source_name.into(),
            rows,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn rows(&self) -> &[ImportedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample_row() -> ImportedRow {
        [
            ("Region", CellValue::Text("North".to_string())),
            ("Revenue", CellValue::Number(1200.5)),
            ("Active", CellValue::Bool(true)),
            ("Notes", CellValue::Empty),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn insert_overwrites_existing_column_in_place() {
        let mut row = sample_row();

        let previous = row.insert("Revenue", CellValue::Number(99.0));

        assert_eq!(previous, Some(CellValue::Number(1200.5)));
        assert_eq!(
            row.keys().collect::<Vec<_>>(),
            vec!["Region", "Revenue", "Active", "Notes"]
        );
        assert_eq!(row.get("Revenue"), Some(&CellValue::Number(99.0)));
    }

    #[test]
    fn row_serializes_as_ordered_json_object() {
        let json = serde_json::to_string(&sample_row()).expect("row should serialize");

        assert_eq!(
            json,
            r#"{"Region":"North","Revenue":1200.5,"Active":true,"Notes":null}"#
        );
    }

    #[test]
    fn date_cells_display_without_midnight_time() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let stamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .expect("valid timestamp");

        assert_eq!(CellValue::DateTime(date).to_string(), "2024-03-09");
        assert_eq!(CellValue::DateTime(stamp).to_string(), "2024-03-09 14:05:00");
        assert_eq!(
            serde_json::to_string(&CellValue::DateTime(stamp)).expect("should serialize"),
            r#""2024-03-09T14:05:00""#
        );
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn batch_rejects_empty_rows() {
        let result = ImportBatch::new("empty.xlsx", Vec::new());

        assert!(matches!(result, Err(ImportError::EmptyDataset)));
    }

    #[test]
    fn batch_keeps_rows_and_source_name() {
        let batch = ImportBatch::new("sales.xlsx", vec![sample_row()]).expect("non-empty batch");

        assert_eq!(
            batch.rows()[0].keys().collect::<Vec<_>>(),
            vec!["Region", "Revenue", "Active", "Notes"]
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.source_name(), "sales.xlsx");
    }
}
