//! # Upload Manager
//!
//! [`UploadManager`] takes one uploaded file at a time through
//! accept → validate → save, and keeps at most one diagnostic for the cycle.
//!
//! ## Two Error Channels
//!
//! - **Usage errors** (no file accepted, target is not a directory, file
//!   already moved) come back as `Err(DropzoneError)`.
//! - **Upload errors** (transport error code, rejected mimetype, failed move)
//!   are recorded on the manager and read with [`UploadManager::error`].
//!   The first one recorded wins; later ones are dropped until the next
//!   [`UploadManager::accept`].
//!
//! ```text
//! Empty --accept--> Ready | Errored --validate_mimetype*--> Ready | Errored
//!       --save--> Saved | Errored
//! ```
//!
//! `save` refuses to move anything while an error is recorded and returns
//! `Ok(None)`.

use crate::error::{DropzoneError, Result};
use crate::mimetype::{Accept, MimeAliases};
use crate::model::RawUpload;
use crate::target::{base_name, find_target_filename};
use crate::upload::fs::TempFileUpload;
use crate::upload::UploadedFile;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MOVE_FAILED: &str = "The file was not successfully moved to the target directory";

/// Used when the client sent no usable filename.
const FALLBACK_FILENAME: &str = "upload";

/// Anything [`UploadManager::accept`] can take: a raw form record or an
/// already-wrapped upload.
pub trait IntoUpload {
    fn into_upload(self) -> Box<dyn UploadedFile>;
}

impl<F: UploadedFile + 'static> IntoUpload for F {
    fn into_upload(self) -> Box<dyn UploadedFile> {
        Box::new(self)
    }
}

impl IntoUpload for Box<dyn UploadedFile> {
    fn into_upload(self) -> Box<dyn UploadedFile> {
        self
    }
}

impl IntoUpload for RawUpload {
    fn into_upload(self) -> Box<dyn UploadedFile> {
        Box::new(TempFileUpload::from(self))
    }
}

#[derive(Default)]
pub struct UploadManager {
    file: Option<Box<dyn UploadedFile>>,
    error: Option<String>,
    aliases: MimeAliases,
}

impl std::fmt::Debug for UploadManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadManager")
            .field("file", &self.file.as_ref().map(|file| file.client_filename()))
            .field("error", &self.error)
            .field("aliases", &self.aliases)
            .finish()
    }
}

impl UploadManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(aliases: MimeAliases) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    /// Start a new cycle with `file`, clearing any previous error.
    pub fn accept(&mut self, file: impl IntoUpload) -> &mut Self {
        self.error = None;

        let file = file.into_upload();
        let code = file.error();
        debug!(
            filename = file.client_filename(),
            media_type = file.client_media_type(),
            size = file.size(),
            "accepted upload"
        );
        self.file = Some(file);

        if !code.is_ok() {
            self.set_error(code.message());
        }
        self
    }

    /// Record an error unless one is already set.
    fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        match &self.error {
            Some(first) => debug!(first = %first, dropped = %message, "error already recorded"),
            None => {
                warn!(error = %message, "upload rejected");
                self.error = Some(message);
            }
        }
    }

    /// The first error of the current cycle, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The upload of the current cycle, if any.
    pub fn file(&self) -> Option<&dyn UploadedFile> {
        self.file.as_deref()
    }

    pub fn aliases(&self) -> &MimeAliases {
        &self.aliases
    }

    /// Reject the upload unless its client media type is in `accepted`.
    pub fn validate_mimetype(&mut self, accepted: impl Into<Accept>) -> Result<&mut Self> {
        let accepted = accepted.into();
        let rejected = {
            let file = self.file.as_ref().ok_or(DropzoneError::NoUploadedFile)?;
            let media_type = file.client_media_type();
            if self.aliases.accepts(&accepted, media_type) {
                None
            } else {
                Some(format!("The mimetype {} is not accepted", media_type))
            }
        };

        if let Some(message) = rejected {
            self.set_error(message);
        }
        Ok(self)
    }

    /// Move the upload into `directory`.
    ///
    /// With `filename` only its base name is used and an existing file of that
    /// name is replaced. Without it the client filename is used and a numeric
    /// suffix is added on collision.
    ///
    /// Returns the absolute target path, or `None` when an error is recorded.
    pub fn save(
        &mut self,
        directory: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<Option<PathBuf>> {
        if self.file.is_none() {
            return Err(DropzoneError::NoUploadedFile);
        }
        if self.error.is_some() {
            return Ok(None);
        }

        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(DropzoneError::NotADirectory(directory.to_path_buf()));
        }
        let directory = std::path::absolute(directory)?;

        let file = self.file.as_mut().ok_or(DropzoneError::NoUploadedFile)?;
        let target = match filename.and_then(base_name) {
            Some(name) => directory.join(name),
            None => {
                let name = base_name(file.client_filename())
                    .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
                find_target_filename(&directory.join(name))?
            }
        };

        match file.move_to(&target) {
            Ok(()) => {
                debug!(target = %target.display(), "upload saved");
                Ok(Some(target))
            }
            Err(DropzoneError::AlreadyMoved) => Err(DropzoneError::AlreadyMoved),
            Err(e) => {
                debug!(target = %target.display(), error = %e, "move failed");
                self.set_error(MOVE_FAILED);
                Ok(None)
            }
        }
    }
}
