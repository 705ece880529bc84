use super::UploadedFile;
use crate::error::{DropzoneError, Result};
use crate::model::UploadErrorCode;
use std::fs;
use std::io;
use std::path::Path;

/// In-memory upload for testing and development.
/// The bytes only reach the disk on `move_to`.
#[derive(Debug, Clone)]
pub struct InMemoryUpload {
    client_filename: String,
    client_media_type: String,
    contents: Vec<u8>,
    error: UploadErrorCode,
    fail_moves: bool,
    moved: bool,
}

impl InMemoryUpload {
    pub fn new(
        client_filename: impl Into<String>,
        client_media_type: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            client_filename: client_filename.into(),
            client_media_type: client_media_type.into(),
            contents: contents.into(),
            error: UploadErrorCode::Ok,
            fail_moves: false,
            moved: false,
        }
    }

    pub fn with_error(mut self, error: UploadErrorCode) -> Self {
        self.error = error;
        self
    }

    /// Make every `move_to` fail with an IO error.
    pub fn failing(mut self) -> Self {
        self.fail_moves = true;
        self
    }

    pub fn is_moved(&self) -> bool {
        self.moved
    }
}

impl UploadedFile for InMemoryUpload {
    fn client_filename(&self) -> &str {
        &self.client_filename
    }

    fn client_media_type(&self) -> &str {
        &self.client_media_type
    }

    fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    fn error(&self) -> UploadErrorCode {
        self.error
    }

    fn move_to(&mut self, target: &Path) -> Result<()> {
        if self.moved {
            return Err(DropzoneError::AlreadyMoved);
        }
        if self.fail_moves {
            return Err(DropzoneError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "move refused",
            )));
        }
        fs::write(target, &self.contents).map_err(DropzoneError::Io)?;
        self.moved = true;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub fn text_upload(name: &str) -> InMemoryUpload {
        InMemoryUpload::new(name, "text/plain", format!("contents of {}", name))
    }

    pub fn image_upload(name: &str) -> InMemoryUpload {
        InMemoryUpload::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    pub fn errored_upload(name: &str, error: UploadErrorCode) -> InMemoryUpload {
        text_upload(name).with_error(error)
    }
}
