use crate::domain::entities::dataset::{CellValue, ImportedRow};
use crate::domain::error::ImportError;
use crate::infra::import::{rows_from_records, DecodeOptions};

/// Treats a comma-separated file as a one-sheet workbook.
pub fn decode_csv(bytes: &[u8], options: &DecodeOptions) -> Result<Vec<ImportedRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ImportError::Decode(err.to_string()))?;
        records.push(record.iter().map(field_to_value).collect::<Vec<_>>());
    }

    Ok(rows_from_records(records, options))
}

fn field_to_value(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }
    match field {
        "TRUE" | "true" => return CellValue::Bool(true),
        "FALSE" | "false" => return CellValue::Bool(false),
        _ => {}
    }
    match field.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => CellValue::Number(number),
        _ => CellValue::Text(field.to_string()),
    }
}
