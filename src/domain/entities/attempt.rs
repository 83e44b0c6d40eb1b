use crate::domain::entities::dataset::ImportBatch;
use crate::domain::entities::upload::{DocumentReceipt, DocumentSummary, UploadResult};
use crate::domain::error::{ErrorKind, ImportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPhase {
    #[default]
    Idle,
    Reading,
    Decoding,
    Submitting,
    Succeeded,
    Failed,
}

/// Which pipeline an attempt belongs to. Documents skip decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseFlow {
    Tabular,
    Document,
}

impl ImportPhase {
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            ImportPhase::Reading | ImportPhase::Decoding | ImportPhase::Submitting
        )
    }

    pub fn can_transition_to(self, next: ImportPhase, flow: PhaseFlow) -> bool {
        use ImportPhase::*;

        match (self, next) {
            (Idle, Reading) => true,
            (Reading, Decoding) => flow == PhaseFlow::Tabular,
            (Reading, Submitting) => flow == PhaseFlow::Document,
            (Decoding, Submitting) => true,
            (Submitting, Succeeded) => true,
            (Reading | Decoding | Submitting, Failed) => true,
            (Succeeded | Failed, Idle) => true,
            _ => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImportPhase::Idle => "Idle",
            ImportPhase::Reading => "Reading file...",
            ImportPhase::Decoding => "Processing...",
            ImportPhase::Submitting => "Uploading...",
            ImportPhase::Succeeded => "Done",
            ImportPhase::Failed => "Failed",
        }
    }
}

/// Moves `current` to `next` when the flow allows it. Returns `false` and
/// leaves the phase untouched otherwise.
fn advance_phase(current: &mut ImportPhase, next: ImportPhase, flow: PhaseFlow) -> bool {
    if !current.can_transition_to(next, flow) {
        tracing::warn!(from = ?current, to = ?next, ?flow, "rejected illegal phase transition");
        return false;
    }
    tracing::debug!(from = ?current, to = ?next, "import phase transition");
    *current = next;
    true
}

/// Record of one spreadsheet import, returned by the pipeline instead of
/// being written into shared state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportAttempt {
    pub generation: u64,
    pub phase: ImportPhase,
    pub batch: Option<ImportBatch>,
    pub upload: Option<UploadResult>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl ImportAttempt {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, next: ImportPhase) -> bool {
        advance_phase(&mut self.phase, next, PhaseFlow::Tabular)
    }

    pub fn record_error(&mut self, err: &ImportError) {
        self.error = Some(err.to_string());
        self.error_kind = Some(err.kind());
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentAttempt {
    pub generation: u64,
    pub phase: ImportPhase,
    pub document: Option<DocumentSummary>,
    pub receipt: Option<DocumentReceipt>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl DocumentAttempt {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, next: ImportPhase) -> bool {
        advance_phase(&mut self.phase, next, PhaseFlow::Document)
    }

    pub fn record_error(&mut self, err: &ImportError) {
        self.error = Some(err.to_string());
        self.error_kind = Some(err.kind());
    }
}

#[cfg(test)]
mod tests {
    use super::ImportPhase::*;
    use super::*;

    #[test]
    fn tabular_flow_visits_every_phase_in_order() {
        let path = [Idle, Reading, Decoding, Submitting, Succeeded];

        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1], PhaseFlow::Tabular),
                "{:?} -> {:?} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn failed_is_reachable_only_from_working_phases() {
        for phase in [Reading, Decoding, Submitting] {
            assert!(phase.can_transition_to(Failed, PhaseFlow::Tabular));
        }
        for phase in [Idle, Succeeded, Failed] {
            assert!(!phase.can_transition_to(Failed, PhaseFlow::Tabular));
        }
    }

    #[test]
    fn tabular_flow_cannot_skip_decoding() {
        assert!(!Reading.can_transition_to(Submitting, PhaseFlow::Tabular));
        assert!(Reading.can_transition_to(Submitting, PhaseFlow::Document));
        assert!(!Reading.can_transition_to(Decoding, PhaseFlow::Document));
    }

    #[test]
    fn terminal_phases_return_to_idle() {
        assert!(Succeeded.can_transition_to(Idle, PhaseFlow::Tabular));
        assert!(Failed.can_transition_to(Idle, PhaseFlow::Document));
        assert!(!Succeeded.is_in_flight());
        assert!(Submitting.is_in_flight());
    }

    #[test]
    fn illegal_transition_leaves_phase_unchanged() {
        let mut attempt = ImportAttempt::new(2);

        assert!(!attempt.advance(Succeeded));
        assert_eq!(attempt.phase, Idle);

        assert!(attempt.advance(Reading));
        assert!(!attempt.advance(Submitting), "tabular imports must decode first");
        assert_eq!(attempt.phase, Reading);
    }

    #[test]
    fn recorded_error_keeps_its_kind() {
        let mut attempt = ImportAttempt::new(1);

        attempt.record_error(&ImportError::Validation("wrong type".to_string()));

        assert_eq!(attempt.error.as_deref(), Some("wrong type"));
        assert_eq!(attempt.error_kind, Some(ErrorKind::Validation));
    }

    #[test]
    fn new_attempt_starts_idle() {
        let mut attempt = DocumentAttempt::new(4);
        assert_eq!(attempt.phase, Idle);

        assert!(attempt.advance(Reading));
        assert!(attempt.advance(Submitting));

        assert_eq!(attempt.phase, Submitting);
        assert_eq!(attempt.generation, 4);
    }
}
