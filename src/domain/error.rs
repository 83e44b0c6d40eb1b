use thiserror::Error;

/// Everything that can end an import or upload attempt.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The selected file has an unsupported type.
    #[error("{0}")]
    Validation(String),

    /// The first sheet has no data rows, or the workbook has no sheets.
    #[error("The selected file contains no data rows")]
    EmptyDataset,

    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },

    /// The bytes could not be parsed as a workbook.
    #[error("Error processing file: {0}")]
    Decode(String),

    #[error("{0}")]
    Submission(String),
}

/// Coarse classification used to decide what the user can do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Pick a different file.
    Validation,
    /// Retry with the same file.
    Io,
    /// Retry the submission.
    Submission,
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::Validation(_) | ImportError::EmptyDataset => ErrorKind::Validation,
            ImportError::Io { .. } | ImportError::Decode(_) => ErrorKind::Io,
            ImportError::Submission(_) => ErrorKind::Submission,
        }
    }
}

impl ErrorKind {
    /// Next step shown under the error banner.
    pub fn hint(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Choose a different file.",
            ErrorKind::Io => "Check the file and try again.",
            ErrorKind::Submission => "Nothing was saved. Try uploading again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_is_a_validation_error() {
        assert_eq!(ImportError::EmptyDataset.kind(), ErrorKind::Validation);
    }

    #[test]
    fn hints_tell_apart_new_file_and_retry() {
        assert_eq!(ErrorKind::Validation.hint(), "Choose a different file.");
        assert_ne!(ErrorKind::Io.hint(), ErrorKind::Validation.hint());
        assert!(ErrorKind::Submission.hint().contains("Try uploading again"));
    }

    #[test]
    fn decode_failures_are_retryable_io_errors() {
        let err = ImportError::Decode("invalid zip header".to_string());

        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "Error processing file: invalid zip header");
    }

    #[test]
    fn io_error_message_names_the_file() {
        let err = ImportError::Io {
            name: "q3.xlsx".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };

        assert_eq!(err.to_string(), "Failed to read q3.xlsx: file not found");
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
