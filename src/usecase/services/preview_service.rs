use crate::domain::entities::dataset::{ImportBatch, ImportedRow};

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Display-ready slice of a batch: text cells aligned to the first row's
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preview {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl Preview {
    pub fn of(batch: &ImportBatch, limit: usize) -> Self {
        Self {
            source: batch.source_name().to_string(),
            ..build_preview(batch.rows(), limit)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn hidden_rows(&self) -> usize {
        self.total_rows.saturating_sub(self.rows.len())
    }
}

pub fn build_preview(rows: &[ImportedRow], limit: usize) -> Preview {
    let Some(first) = rows.first() else {
        return Preview::default();
    };
    let headers: Vec<String> = first.keys().map(str::to_string).collect();

    let shown = rows
        .iter()
        .take(limit)
        .map(|row| {
            headers
                .iter()
                .map(|header| row.get(header).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    Preview {
        source: String::new(),
        headers,
        rows: shown,
        total_rows: rows.len(),
    }
}
