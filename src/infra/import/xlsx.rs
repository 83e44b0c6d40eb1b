use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::dataset::{CellValue, ImportedRow};
use crate::domain::error::ImportError;
use crate::infra::import::{rows_from_records, DecodeOptions};

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::Text(v.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => v
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(v.as_f64())),
        Data::DateTimeIso(v) => parse_iso_datetime(v)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(v.clone())),
        Data::DurationIso(v) => CellValue::Text(v.clone()),
        Data::Error(v) => CellValue::Text(format!("{v:?}")),
        Data::Empty => CellValue::Empty,
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Decodes the first sheet, in workbook order, of an xlsx/xls/xlsb/ods blob.
pub fn decode_workbook(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<Vec<ImportedRow>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| ImportError::Decode(err.to_string()))?;

    let Some(first_sheet) = workbook.worksheet_range_at(0) else {
        return Err(ImportError::EmptyDataset);
    };
    let range = first_sheet.map_err(|err| ImportError::Decode(err.to_string()))?;

    let records = range
        .rows()
        .map(|row| row.iter().map(cell_to_value).collect::<Vec<_>>());
    Ok(rows_from_records(records, options))
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    use super::*;
    use crate::tests::workbook_bytes;

    #[test]
    fn decodes_every_data_row_of_first_sheet() {
        let bytes = workbook_bytes(&[(
            "Sales",
            vec![
                vec!["Region", "Revenue", "Units"],
                vec!["North", "1200.5", "10"],
                vec!["South", "800", "4"],
                vec!["West", "950", "7"],
            ],
        )]);

        let rows = decode_workbook(&bytes, &DecodeOptions::default())
            .expect("workbook should decode");

        assert_eq!(rows.len(), 3, "header row is not a data row");
        assert_eq!(
            rows[0].keys().collect::<Vec<_>>(),
            vec!["Region", "Revenue", "Units"]
        );
        assert_eq!(rows[0].get("Revenue"), Some(&CellValue::Number(1200.5)));
        assert_eq!(
            rows[2].get("Region"),
            Some(&CellValue::Text("West".to_string()))
        );
    }

    #[test]
    fn picks_first_sheet_by_position_not_name() {
        let bytes = workbook_bytes(&[
            ("Zeta", vec![vec!["Key"], vec!["first"]]),
            ("Alpha", vec![vec!["Key"], vec!["a"], vec!["b"], vec!["c"]]),
        ]);

        let rows = decode_workbook(&bytes, &DecodeOptions::default())
            .expect("workbook should decode");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Key"), Some(&CellValue::Text("first".to_string())));
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        let bytes = workbook_bytes(&[("Empty", vec![vec!["Region", "Revenue"]])]);

        let rows = decode_workbook(&bytes, &DecodeOptions::default())
            .expect("workbook should decode");

        assert!(rows.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = decode_workbook(b"definitely not a workbook", &DecodeOptions::default());

        assert!(matches!(result, Err(ImportError::Decode(_))));
    }

    #[test]
    fn date_formatted_cells_decode_as_dates() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let stamp_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let closed = ExcelDateTime::from_ymd(2024, 3, 9).expect("valid date");
        let logged = ExcelDateTime::from_ymd(2024, 3, 9)
            .and_then(|date| date.and_hms(14, 5, 0))
            .expect("valid timestamp");
        sheet.write_string(0, 0, "Deal").expect("header");
        sheet.write_string(0, 1, "Closed").expect("header");
        sheet.write_string(0, 2, "Logged").expect("header");
        sheet.write_string(1, 0, "Acme").expect("cell");
        sheet
            .write_datetime_with_format(1, 1, &closed, &date_format)
            .expect("date cell");
        sheet
            .write_datetime_with_format(1, 2, &logged, &stamp_format)
            .expect("timestamp cell");
        let bytes = workbook.save_to_buffer().expect("workbook should serialize");

        let rows = decode_workbook(&bytes, &DecodeOptions::default())
            .expect("workbook should decode");

        let expected_date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let closed = rows[0].get("Closed").expect("Closed column");
        assert_eq!(closed, &CellValue::DateTime(expected_date));
        assert_eq!(closed.to_string(), "2024-03-09");

        let logged = rows[0].get("Logged").expect("Logged column");
        assert!(matches!(logged, CellValue::DateTime(_)));
        assert!(logged.to_string().starts_with("2024-03-09 14:0"));
    }

    #[test]
    fn iso_cells_become_dates() {
        let value = cell_to_value(&Data::DateTimeIso("2024-05-01T08:30:00".to_string()));
        let date_only = cell_to_value(&Data::DateTimeIso("2024-05-01".to_string()));

        assert_eq!(value.to_string(), "2024-05-01 08:30:00");
        assert_eq!(date_only.to_string(), "2024-05-01");
        assert!(matches!(value, CellValue::DateTime(_)));
    }

    #[test]
    fn scalar_cells_keep_native_type() {
        assert_eq!(cell_to_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_to_value(&Data::Bool(false)), CellValue::Bool(false));
        assert_eq!(cell_to_value(&Data::Empty), CellValue::Empty);
    }
}
