//! Temporary file handed to the editor.

use crate::core::error::EditError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const SCRATCH_PREFIX: &str = "redis-edit";

/// Uniquely named temp file owned by one session.
///
/// The file is removed when the value is dropped, so every exit path cleans
/// up. [`ScratchFile::close`] removes it eagerly and reports failures.
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub fn create(contents: &[u8]) -> Result<Self, EditError> {
        let mut file = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempfile()
            .map_err(EditError::ScratchFileError)?;
        file.write_all(contents)
            .map_err(EditError::ScratchFileError)?;
        file.flush().map_err(EditError::ScratchFileError)?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Current bytes on disk. Editors that save by renaming a new file over
    /// the old path are handled because this reads by path.
    pub fn read_back(&self) -> Result<Vec<u8>, EditError> {
        std::fs::read(self.path()).map_err(EditError::ScratchFileError)
    }

    pub fn close(self) -> Result<(), EditError> {
        self.file.close().map_err(EditError::ScratchFileError)
    }
}
