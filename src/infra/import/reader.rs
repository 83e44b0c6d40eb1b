use async_trait::async_trait;

use crate::domain::error::ImportError;
use crate::usecase::ports::source::{FileHandle, FileSource};

/// Reads selected files from the local filesystem without blocking the UI
/// loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

#[async_trait]
impl FileSource for FsFileSource {
    async fn read(&self, file: &FileHandle) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&file.path).await
    }
}

/// File types a flow accepts, matched case-insensitively on the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedExtensions {
    label: String,
    extensions: Vec<String>,
}

impl AcceptedExtensions {
    pub fn new<I, S>(label: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self {
            label: label.into(),
            extensions,
        }
    }

    pub fn spreadsheets() -> Self {
        Self::new("an Excel file", ["xlsx", "xls"])
    }

    pub fn pdf() -> Self {
        Self::new("a PDF file", ["pdf"])
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn accepts(&self, file: &FileHandle) -> bool {
        file.extension()
            .is_some_and(|ext| self.extensions.iter().any(|accepted| *accepted == ext))
    }

    /// `.xlsx or .xls`, `.xlsx, .xls or .csv`
    pub fn describe(&self) -> String {
        let dotted: Vec<String> = self.extensions.iter().map(|ext| format!(".{ext}")).collect();
        match dotted.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
        }
    }

    pub fn rejection_message(&self) -> String {
        format!("Please upload {} ({})", self.label, self.describe())
    }
}

/// Validates the name first; the source is only touched for accepted files.
pub async fn read_accepted(
    source: &dyn FileSource,
    file: &FileHandle,
    accepted: &AcceptedExtensions,
) -> Result<Vec<u8>, ImportError> {
    if !accepted.accepts(file) {
        tracing::warn!(file = %file.name, "rejected file with unsupported extension");
        return Err(ImportError::Validation(accepted.rejection_message()));
    }

    source.read(file).await.map_err(|err| ImportError::Io {
        name: file.name.clone(),
        source: err,
    })
}
