use std::sync::Arc;

use crate::domain::entities::attempt::{ImportAttempt, ImportPhase};
use crate::domain::entities::dataset::ImportBatch;
use crate::domain::entities::upload::UploadResult;
use crate::domain::error::{ErrorKind, ImportError};
use crate::infra::import::reader::{read_accepted, AcceptedExtensions};
use crate::infra::import::{decode_bytes, DecodeOptions, SheetFormat};
use crate::usecase::ports::sink::RowSink;
use crate::usecase::ports::source::{FileHandle, FileSource};

/// Runs the read, decode and submit steps for one selected spreadsheet.
pub struct ImportService {
    source: Arc<dyn FileSource>,
    sink: Arc<dyn RowSink>,
    accepted: AcceptedExtensions,
    decode: DecodeOptions,
}

impl ImportService {
    pub fn new(
        source: Arc<dyn FileSource>,
        sink: Arc<dyn RowSink>,
        accepted: AcceptedExtensions,
        decode: DecodeOptions,
    ) -> Self {
        Self {
            source,
            sink,
            accepted,
            decode,
        }
    }

    pub fn accepted(&self) -> &AcceptedExtensions {
        &self.accepted
    }

    pub async fn read(&self, file: &FileHandle) -> Result<Vec<u8>, ImportError> {
        read_accepted(self.source.as_ref(), file, &self.accepted).await
    }

    pub fn decode(&self, file: &FileHandle, bytes: &[u8]) -> Result<ImportBatch, ImportError> {
        let format = SheetFormat::from_extension(file.extension().as_deref());
        decode_bytes(&file.name, format, bytes, &self.decode)
    }

    /// Forwards the batch once. Sink failures become `ImportError::Submission`.
    pub async fn try_submit(&self, batch: &ImportBatch) -> Result<UploadResult, ImportError> {
        let ack = self
            .sink
            .submit_rows(batch.rows())
            .await
            .map_err(|err| ImportError::Submission(err.to_string()))?;

        Ok(UploadResult::success(
            ack.message,
            ack.row_count.unwrap_or(batch.len()),
        ))
    }

    /// Like `try_submit`, but always yields a result for the status banner.
    pub async fn submit(&self, batch: &ImportBatch) -> UploadResult {
        match self.try_submit(batch).await {
            Ok(result) => result,
            Err(err) => UploadResult::failure(err.to_string(), batch.len()),
        }
    }

    /// Runs one attempt to completion. `on_phase` sees every phase entered;
    /// the returned attempt is the only other output.
    pub async fn run<F>(&self, generation: u64, file: &FileHandle, mut on_phase: F) -> ImportAttempt
    where
        F: FnMut(ImportPhase),
    {
        let mut attempt = ImportAttempt::new(generation);
        let mut enter = |attempt: &mut ImportAttempt, phase: ImportPhase| {
            if attempt.advance(phase) {
                on_phase(phase);
            }
        };

        tracing::info!(generation, file = %file.name, "import started");
        enter(&mut attempt, ImportPhase::Reading);
        let bytes = match self.read(file).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(generation, error = %err, "import failed while reading");
                attempt.record_error(&err);
                enter(&mut attempt, ImportPhase::Failed);
                return attempt;
            }
        };

        enter(&mut attempt, ImportPhase::Decoding);
        let batch = match self.decode(file, &bytes) {
            Ok(batch) => batch,
            Err(err) => {
                tracing::warn!(generation, error = %err, "import failed while decoding");
                attempt.record_error(&err);
                enter(&mut attempt, ImportPhase::Failed);
                return attempt;
            }
        };
        drop(bytes);
        attempt.batch = Some(batch.clone());

        enter(&mut attempt, ImportPhase::Submitting);
        let upload = self.submit(&batch).await;
        if upload.succeeded {
            tracing::info!(generation, rows = upload.row_count, "import succeeded");
            attempt.upload = Some(upload);
            enter(&mut attempt, ImportPhase::Succeeded);
        } else {
            tracing::warn!(generation, message = %upload.message, "import submission failed");
            attempt.error = Some(upload.message.clone());
            attempt.error_kind = Some(ErrorKind::Submission);
            attempt.upload = Some(upload);
            enter(&mut attempt, ImportPhase::Failed);
        }
        attempt
    }
}
