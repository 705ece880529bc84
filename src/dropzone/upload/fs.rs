use super::UploadedFile;
use crate::error::{DropzoneError, Result};
use crate::model::{RawUpload, UploadErrorCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const STAGING_PREFIX: &str = "dropzone-";
const STAGING_EXT: &str = ".upload";

/// An upload whose bytes sit in a temporary file.
#[derive(Debug, Clone)]
pub struct TempFileUpload {
    tmp_path: PathBuf,
    size: u64,
    error: UploadErrorCode,
    client_filename: String,
    client_media_type: String,
    moved: bool,
}

impl TempFileUpload {
    pub fn new(
        tmp_path: PathBuf,
        size: u64,
        error: UploadErrorCode,
        client_filename: impl Into<String>,
        client_media_type: impl Into<String>,
    ) -> Self {
        Self {
            tmp_path,
            size,
            error,
            client_filename: client_filename.into(),
            client_media_type: client_media_type.into(),
            moved: false,
        }
    }

    /// Turn a local file into an upload, as if a client had just sent it.
    ///
    /// With `keep_source` the file is first copied to a staging path in the
    /// system temp dir so the original survives the move. The media type is
    /// guessed from the extension unless `media_type` is given.
    pub fn stage(source: &Path, keep_source: bool, media_type: Option<&str>) -> Result<Self> {
        let meta = fs::metadata(source).map_err(DropzoneError::Io)?;
        if !meta.is_file() {
            return Err(DropzoneError::Api(format!(
                "Not a regular file: {}",
                source.display()
            )));
        }

        let client_filename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let client_media_type = match media_type {
            Some(mt) => mt.to_string(),
            None => mime_guess::from_path(source)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        let tmp_path = if keep_source {
            let staged = std::env::temp_dir().join(format!(
                "{}{}{}",
                STAGING_PREFIX,
                Uuid::new_v4(),
                STAGING_EXT
            ));
            fs::copy(source, &staged).map_err(DropzoneError::Io)?;
            debug!(source = %source.display(), staged = %staged.display(), "staged upload copy");
            staged
        } else {
            source.to_path_buf()
        };

        Ok(Self::new(
            tmp_path,
            meta.len(),
            UploadErrorCode::Ok,
            client_filename,
            client_media_type,
        ))
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    /// Remove a staged copy that was never moved.
    pub fn discard(self) -> Result<()> {
        if !self.moved && self.tmp_path.exists() {
            fs::remove_file(&self.tmp_path).map_err(DropzoneError::Io)?;
        }
        Ok(())
    }
}

impl From<RawUpload> for TempFileUpload {
    fn from(raw: RawUpload) -> Self {
        Self::new(raw.tmp_name, raw.size, raw.error, raw.name, raw.media_type)
    }
}

impl UploadedFile for TempFileUpload {
    fn client_filename(&self) -> &str {
        &self.client_filename
    }

    fn client_media_type(&self) -> &str {
        &self.client_media_type
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn error(&self) -> UploadErrorCode {
        self.error
    }

    fn move_to(&mut self, target: &Path) -> Result<()> {
        if self.moved {
            return Err(DropzoneError::AlreadyMoved);
        }
        if !self.error.is_ok() {
            return Err(DropzoneError::Api(format!(
                "Cannot move an upload with error: {}",
                self.error
            )));
        }

        match fs::rename(&self.tmp_path, target) {
            Ok(()) => {}
            // rename(2) does not cross filesystems; temp dirs are often on tmpfs.
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(error = %e, "rename crosses devices, falling back to copy");
                copy_across(&self.tmp_path, target, |p| fs::remove_file(p))
                    .map_err(DropzoneError::Io)?;
            }
            Err(e) => return Err(DropzoneError::Io(e)),
        }

        self.moved = true;
        Ok(())
    }
}

/// Copy `source` to `target`, then drop `source` with `remove`.
///
/// If the source cannot be removed the copy is deleted again, so a failed
/// move never leaves a file behind at the target.
fn copy_across<F>(source: &Path, target: &Path, remove: F) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    fs::copy(source, target)?;
    if let Err(e) = remove(source) {
        if let Err(cleanup) = fs::remove_file(target) {
            debug!(error = %cleanup, target = %target.display(), "could not remove partial copy");
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_upload(dir: &TempDir, name: &str, content: &str) -> TempFileUpload {
        let tmp = dir.path().join(format!("{}.tmp", name));
        fs::write(&tmp, content).unwrap();
        TempFileUpload::new(
            tmp,
            content.len() as u64,
            UploadErrorCode::Ok,
            name,
            "text/plain",
        )
    }

    #[test]
    fn moves_temp_file_to_target() {
        let dir = TempDir::new().unwrap();
        let mut upload = tmp_upload(&dir, "a.txt", "hello");
        let source = upload.tmp_path().to_path_buf();
        let target = dir.path().join("a.txt");

        upload.move_to(&target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
        assert!(!source.exists());
    }

    #[test]
    fn second_move_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut upload = tmp_upload(&dir, "a.txt", "hello");
        upload.move_to(&dir.path().join("first.txt")).unwrap();

        let err = upload.move_to(&dir.path().join("second.txt")).unwrap_err();
        assert!(matches!(err, DropzoneError::AlreadyMoved));
    }

    #[test]
    fn missing_temp_file_fails_move() {
        let dir = TempDir::new().unwrap();
        let mut upload = TempFileUpload::new(
            dir.path().join("gone.tmp"),
            0,
            UploadErrorCode::Ok,
            "gone.txt",
            "text/plain",
        );
        let target = dir.path().join("gone.txt");
        assert!(upload.move_to(&target).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn copy_across_removes_source() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let source = dir.path().join("a.tmp");
        let target = other.path().join("a.txt");
        fs::write(&source, "hello").unwrap();

        copy_across(&source, &target, |p| fs::remove_file(p)).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
        assert!(!source.exists());
    }

    #[test]
    fn copy_across_undoes_copy_when_source_stays() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.tmp");
        let target = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();

        let err = copy_across(&source, &target, |_| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(!target.exists());
        assert!(source.exists());
    }

    #[test]
    fn copy_across_fails_without_source() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a.txt");
        assert!(copy_across(&dir.path().join("gone.tmp"), &target, |p| fs::remove_file(p)).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn upload_with_error_code_cannot_move() {
        let dir = TempDir::new().unwrap();
        let mut upload = tmp_upload(&dir, "a.txt", "x");
        upload.error = UploadErrorCode::Partial;
        assert!(upload.move_to(&dir.path().join("a.txt")).is_err());
    }

    #[test]
    fn stage_with_copy_keeps_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, "keep me").unwrap();

        let upload = TempFileUpload::stage(&source, true, None).unwrap();
        assert_eq!(upload.client_filename(), "notes.txt");
        assert_eq!(upload.client_media_type(), "text/plain");
        assert_eq!(upload.size(), 7);
        assert_ne!(upload.tmp_path(), source.as_path());
        assert!(source.exists());

        let staged = upload.tmp_path().to_path_buf();
        upload.discard().unwrap();
        assert!(!staged.exists());
        assert!(source.exists());
    }

    #[test]
    fn stage_without_copy_uses_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.png");
        fs::write(&source, [0u8; 4]).unwrap();

        let upload = TempFileUpload::stage(&source, false, None).unwrap();
        assert_eq!(upload.tmp_path(), source.as_path());
        assert_eq!(upload.client_media_type(), "image/png");
    }

    #[test]
    fn stage_honours_explicit_media_type() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("data.bin");
        fs::write(&source, "x").unwrap();

        let upload = TempFileUpload::stage(&source, false, Some("text/plain")).unwrap();
        assert_eq!(upload.client_media_type(), "text/plain");
    }

    #[test]
    fn stage_rejects_directories() {
        let dir = TempDir::new().unwrap();
        assert!(TempFileUpload::stage(dir.path(), true, None).is_err());
    }

    #[test]
    fn builds_from_raw_record() {
        let raw = RawUpload {
            name: "a.txt".into(),
            media_type: "text/plain".into(),
            tmp_name: PathBuf::from("/tmp/upload-1"),
            error: UploadErrorCode::NoFile,
            size: 3,
        };
        let upload = TempFileUpload::from(raw);
        assert_eq!(upload.client_filename(), "a.txt");
        assert_eq!(upload.error(), UploadErrorCode::NoFile);
        assert_eq!(upload.tmp_path(), Path::new("/tmp/upload-1"));
    }
}
