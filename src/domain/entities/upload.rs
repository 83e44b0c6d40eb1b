/// Outcome of one submission attempt, shown in the status banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub succeeded: bool,
    pub message: String,
    pub row_count: usize,
}

impl UploadResult {
    pub fn success(message: impl Into<String>, row_count: usize) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            row_count,
        }
    }

    pub fn failure(message: impl Into<String>, row_count: usize) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            row_count,
        }
    }
}

/// A PDF held in memory between reading and upload. Never decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            name: self.name.clone(),
            size_bytes: self.size_bytes(),
        }
    }
}

/// Metadata shown as the document preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub name: String,
    pub size_bytes: u64,
}

impl DocumentSummary {
    /// Size in kilobytes, rounded to the nearest whole KB.
    pub fn size_kb(&self) -> u64 {
        (self.size_bytes as f64 / 1024.0).round() as u64
    }

    pub fn label(&self) -> String {
        format!("{} ({} KB)", self.name, self.size_kb())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReceipt {
    pub succeeded: bool,
    pub message: String,
    pub document: DocumentSummary,
}
