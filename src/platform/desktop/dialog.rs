use rfd::FileDialog;

use crate::infra::import::reader::AcceptedExtensions;
use crate::usecase::ports::source::FileHandle;

/// Native picker. "All files" stays available so the name check in the
/// reader still decides what is accepted.
pub fn pick_file(kind: &str, accepted: &AcceptedExtensions) -> Option<FileHandle> {
    FileDialog::new()
        .add_filter(kind, accepted.extensions())
        .add_filter("All files", &["*"])
        .pick_file()
        .map(FileHandle::from_path)
}
