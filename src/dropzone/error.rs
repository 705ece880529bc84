use std::path::PathBuf;
use thiserror::Error;

/// Usage and infrastructure failures.
///
/// Problems with the upload itself (transport codes, rejected mimetypes,
/// failed moves) are not errors at this level: they are recorded on the
/// [`UploadManager`](crate::uploader::UploadManager) and read back with
/// `error()`.
#[derive(Error, Debug)]
pub enum DropzoneError {
    #[error("There are no uploaded file information")]
    NoUploadedFile,

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("The uploaded file has already been moved")]
    AlreadyMoved,

    #[error("No free filename left for {}", .0.display())]
    NoFreeFilename(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DropzoneError>;
