use std::sync::Arc;

use crate::domain::entities::attempt::{DocumentAttempt, ImportPhase};
use crate::domain::entities::upload::{DocumentReceipt, DocumentUpload};
use crate::domain::error::ErrorKind;
use crate::infra::import::reader::{read_accepted, AcceptedExtensions};
use crate::usecase::ports::sink::DocumentSink;
use crate::usecase::ports::source::{FileHandle, FileSource};

/// PDF flow: validate, read, upload. The file is never parsed.
pub struct DocumentService {
    source: Arc<dyn FileSource>,
    sink: Arc<dyn DocumentSink>,
    accepted: AcceptedExtensions,
}

impl DocumentService {
    pub fn new(source: Arc<dyn FileSource>, sink: Arc<dyn DocumentSink>) -> Self {
        Self {
            source,
            sink,
            accepted: AcceptedExtensions::pdf(),
        }
    }

    pub fn accepted(&self) -> &AcceptedExtensions {
        &self.accepted
    }

    pub async fn run<F>(
        &self,
        generation: u64,
        file: &FileHandle,
        mut on_phase: F,
    ) -> DocumentAttempt
    where
        F: FnMut(ImportPhase),
    {
        let mut attempt = DocumentAttempt::new(generation);
        let mut enter = |attempt: &mut DocumentAttempt, phase: ImportPhase| {
            if attempt.advance(phase) {
                on_phase(phase);
            }
        };

        enter(&mut attempt, ImportPhase::Reading);
        let document = match read_accepted(self.source.as_ref(), file, &self.accepted).await {
            Ok(bytes) => DocumentUpload {
                name: file.name.clone(),
                bytes,
            },
            Err(err) => {
                tracing::warn!(generation, error = %err, "document rejected");
                attempt.record_error(&err);
                enter(&mut attempt, ImportPhase::Failed);
                return attempt;
            }
        };
        let summary = document.summary();
        attempt.document = Some(summary.clone());

        enter(&mut attempt, ImportPhase::Submitting);
        match self.sink.upload_document(&document).await {
            Ok(ack) => {
                tracing::info!(generation, file = %summary.name, "document uploaded");
                attempt.receipt = Some(DocumentReceipt {
                    succeeded: true,
                    message: ack.message,
                    document: summary,
                });
                enter(&mut attempt, ImportPhase::Succeeded);
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "document upload failed");
                attempt.error = Some(err.to_string());
                attempt.error_kind = Some(ErrorKind::Submission);
                attempt.receipt = Some(DocumentReceipt {
                    succeeded: false,
                    message: err.to_string(),
                    document: summary,
                });
                enter(&mut attempt, ImportPhase::Failed);
            }
        }
        attempt
    }
}
