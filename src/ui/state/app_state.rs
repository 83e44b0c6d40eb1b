use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::attempt::{DocumentAttempt, ImportAttempt, ImportPhase};
use crate::domain::entities::dataset::ImportBatch;
use crate::domain::entities::upload::{DocumentReceipt, DocumentSummary, UploadResult};
use crate::domain::error::ErrorKind;

/// What the spreadsheet page shows. Updates from any attempt other than the
/// newest one are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportView {
    pub generation: u64,
    pub phase: ImportPhase,
    pub file_name: Option<String>,
    pub batch: Option<ImportBatch>,
    pub upload: Option<UploadResult>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl ImportView {
    /// Starts a new attempt and returns its generation.
    pub fn begin(&mut self, file_name: &str) -> u64 {
        self.generation += 1;
        self.phase = ImportPhase::Idle;
        self.file_name = Some(file_name.to_string());
        self.batch = None;
        self.upload = None;
        self.error = None;
        self.error_kind = None;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn observe(&mut self, generation: u64, phase: ImportPhase) {
        if self.is_current(generation) {
            self.phase = phase;
        }
    }

    pub fn finish(&mut self, attempt: ImportAttempt) {
        if !self.is_current(attempt.generation) {
            tracing::debug!(
                stale = attempt.generation,
                current = self.generation,
                "dropping result of superseded import"
            );
            return;
        }
        self.phase = attempt.phase;
        self.batch = attempt.batch;
        self.upload = attempt.upload;
        self.error = attempt.error;
        self.error_kind = attempt.error_kind;
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_in_flight()
    }

    pub fn error_hint(&self) -> Option<&'static str> {
        self.error_kind.map(ErrorKind::hint)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentView {
    pub generation: u64,
    pub phase: ImportPhase,
    pub document: Option<DocumentSummary>,
    pub receipt: Option<DocumentReceipt>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl DocumentView {
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.phase = ImportPhase::Idle;
        self.document = None;
        self.receipt = None;
        self.error = None;
        self.error_kind = None;
        self.generation
    }

    pub fn observe(&mut self, generation: u64, phase: ImportPhase) {
        if self.generation == generation {
            self.phase = phase;
        }
    }

    pub fn finish(&mut self, attempt: DocumentAttempt) {
        if self.generation != attempt.generation {
            return;
        }
        self.phase = attempt.phase;
        self.document = attempt.document;
        self.receipt = attempt.receipt;
        self.error = attempt.error;
        self.error_kind = attempt.error_kind;
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_in_flight()
    }

    pub fn error_hint(&self) -> Option<&'static str> {
        self.error_kind.map(ErrorKind::hint)
    }

    pub fn uploaded(&self) -> bool {
        self.error.is_none() && self.receipt.as_ref().is_some_and(|r| r.succeeded)
    }
}

pub struct AppState {
    pub import: Signal<ImportView>,
    pub document: Signal<DocumentView>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            import: use_signal(ImportView::default),
            document: use_signal(DocumentView::default),
        }
    }
}
