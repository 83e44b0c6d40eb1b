use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::dataset::ImportedRow;
use crate::domain::entities::upload::DocumentUpload;
use crate::usecase::ports::sink::{DocumentSink, RowSink, SinkAck, SinkError};

/// Stand-in for the import endpoint: waits, then accepts everything except
/// an empty row set.
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    delay: Duration,
}

impl SimulatedSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl RowSink for SimulatedSink {
    async fn submit_rows(&self, rows: &[ImportedRow]) -> Result<SinkAck, SinkError> {
        tokio::time::sleep(self.delay).await;

        if rows.is_empty() {
            return Err(SinkError::Rejected {
                status: Some(400),
                message: "Invalid data format".to_string(),
            });
        }

        tracing::info!(rows = rows.len(), "simulated sink accepted rows");
        Ok(SinkAck {
            message: "Data imported successfully".to_string(),
            row_count: Some(rows.len()),
        })
    }
}

#[async_trait]
impl DocumentSink for SimulatedSink {
    async fn upload_document(&self, document: &DocumentUpload) -> Result<SinkAck, SinkError> {
        tokio::time::sleep(self.delay).await;

        tracing::info!(
            file = %document.name,
            size = document.size_bytes(),
            "simulated sink accepted document"
        );
        Ok(SinkAck {
            message: "File uploaded successfully".to_string(),
            row_count: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::CellValue;

    fn instant() -> SimulatedSink {
        SimulatedSink::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn accepts_rows_and_reports_count() {
        let rows: Vec<ImportedRow> = (0..3)
            .map(|idx| [("Id", CellValue::Number(idx as f64))].into_iter().collect())
            .collect();

        let ack = instant()
            .submit_rows(&rows)
            .await
            .expect("rows should be accepted");

        assert_eq!(ack.row_count, Some(3));
        assert_eq!(ack.message, "Data imported successfully");
    }

    #[tokio::test]
    async fn rejects_empty_row_set() {
        let result = instant().submit_rows(&[]).await;

        assert_eq!(
            result,
            Err(SinkError::Rejected {
                status: Some(400),
                message: "Invalid data format".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn accepts_documents() {
        let document = DocumentUpload {
            name: "deck.pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
        };

        let ack = instant()
            .upload_document(&document)
            .await
            .expect("document should be accepted");

        assert_eq!(ack.message, "File uploaded successfully");
    }
}
