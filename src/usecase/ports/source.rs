use std::path::PathBuf;

use async_trait::async_trait;

/// A user-selected file: the display name used for validation plus where
/// to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub path: PathBuf,
}

impl FileHandle {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Lowercased extension taken from the file name.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

#[async_trait]
pub trait FileSource: Send + Sync {
    async fn read(&self, file: &FileHandle) -> std::io::Result<Vec<u8>>;
}
