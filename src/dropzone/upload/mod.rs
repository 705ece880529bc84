//! # Upload Sources
//!
//! An upload source is whatever hands the manager one client-submitted file:
//! metadata reported by the client plus a way to move the received bytes to
//! their final location. The [`UploadedFile`] trait is the seam, so the
//! manager never knows where the bytes actually live.
//!
//! ## Implementations
//!
//! - [`fs::TempFileUpload`]: production source backed by a temporary file
//!   on disk, built from a [`RawUpload`](crate::model::RawUpload) record or
//!   by staging a local file.
//! - [`memory::InMemoryUpload`]: bytes held in memory, for tests. Can be told
//!   to fail its move to exercise error paths.
//!
//! ## Single Use
//!
//! A source is consumed by its first successful `move_to`. Any later call
//! returns [`DropzoneError::AlreadyMoved`](crate::error::DropzoneError).

use crate::error::Result;
use crate::model::UploadErrorCode;
use std::path::Path;

pub mod fs;
pub mod memory;

/// One uploaded file, as seen by the [`UploadManager`](crate::uploader::UploadManager).
pub trait UploadedFile {
    /// Filename as sent by the client. Untrusted; may contain path parts.
    fn client_filename(&self) -> &str;

    /// Media type as sent by the client. Untrusted.
    fn client_media_type(&self) -> &str;

    /// Size in bytes
    fn size(&self) -> u64;

    /// Transport outcome for this upload
    fn error(&self) -> UploadErrorCode;

    /// Move the received bytes to `target`, consuming the upload.
    fn move_to(&mut self, target: &Path) -> Result<()>;
}
