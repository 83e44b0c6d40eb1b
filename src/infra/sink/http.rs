use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::domain::entities::dataset::ImportedRow;
use crate::domain::entities::upload::DocumentUpload;
use crate::usecase::ports::sink::{DocumentSink, RowSink, SinkAck, SinkError};

/// Posts imports to a real backend.
pub struct HttpSink {
    client: Client,
    rows_endpoint: String,
    documents_endpoint: String,
}

#[derive(Serialize)]
struct ImportRowsRequest<'a> {
    data: &'a [ImportedRow],
}

#[derive(Debug, Default, Deserialize)]
struct SinkResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    rows: Option<usize>,
}

impl HttpSink {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        rows_endpoint: impl Into<String>,
        documents_endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SinkError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SinkError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            rows_endpoint: rows_endpoint.into(),
            documents_endpoint: documents_endpoint.into(),
        })
    }
}

fn transport_error(err: reqwest::Error) -> SinkError {
    if err.is_timeout() {
        SinkError::Transport("request timed out".to_string())
    } else if err.is_connect() {
        SinkError::Transport("server unavailable".to_string())
    } else {
        SinkError::Transport(err.to_string())
    }
}

async fn read_ack(
    response: Response,
    default_message: &str,
    failure: &str,
) -> Result<SinkAck, SinkError> {
    let status = response.status();
    let body: SinkResponse = response.json().await.unwrap_or_default();

    if status.is_success() {
        Ok(SinkAck {
            message: body
                .message
                .unwrap_or_else(|| default_message.to_string()),
            row_count: body.rows,
        })
    } else {
        Err(SinkError::Rejected {
            status: Some(status.as_u16()),
            message: body
                .message
                .unwrap_or_else(|| format!("{failure} (status {})", status.as_u16())),
        })
    }
}

#[async_trait]
impl RowSink for HttpSink {
    async fn submit_rows(&self, rows: &[ImportedRow]) -> Result<SinkAck, SinkError> {
        tracing::info!(endpoint = %self.rows_endpoint, rows = rows.len(), "posting rows");
        let response = self
            .client
            .post(&self.rows_endpoint)
            .json(&ImportRowsRequest { data: rows })
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response, "Data imported successfully", "Failed to save data").await
    }
}

#[async_trait]
impl DocumentSink for HttpSink {
    async fn upload_document(&self, document: &DocumentUpload) -> Result<SinkAck, SinkError> {
        tracing::info!(
            endpoint = %self.documents_endpoint,
            file = %document.name,
            size = document.size_bytes(),
            "posting document"
        );
        let response = self
            .client
            .post(&self.documents_endpoint)
            .header(CONTENT_TYPE, "application/pdf")
            .header("X-File-Name", document.name.as_str())
            .body(document.bytes.clone())
            .send()
            .await
            .map_err(transport_error)?;

        read_ack(response, "File uploaded successfully", "Failed to upload PDF").await
    }
}
