use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::dataset::ImportedRow;
use crate::domain::entities::upload::DocumentUpload;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink answered but refused the payload.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// The sink could not be reached.
    #[error("Upload failed: {0}")]
    Transport(String),
}

/// What a sink reports back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkAck {
    pub message: String,
    pub row_count: Option<usize>,
}

#[async_trait]
pub trait RowSink: Send + Sync {
    async fn submit_rows(&self, rows: &[ImportedRow]) -> Result<SinkAck, SinkError>;
}

#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn upload_document(&self, document: &DocumentUpload) -> Result<SinkAck, SinkError>;
}
