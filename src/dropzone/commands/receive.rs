use crate::commands::{save, CmdResult, SaveRequest};
use crate::error::{DropzoneError, Result};
use crate::model::RawUpload;
use crate::uploader::UploadManager;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A manifest holds one raw form record or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    One(RawUpload),
    Many(Vec<RawUpload>),
}

pub fn parse_manifest(content: &str) -> Result<Vec<RawUpload>> {
    let manifest: Manifest = serde_json::from_str(content).map_err(DropzoneError::Serialization)?;
    Ok(match manifest {
        Manifest::One(raw) => vec![raw],
        Manifest::Many(list) => list,
    })
}

/// Save the uploads described by the manifest at `manifest_path`.
pub fn run(
    manager: &mut UploadManager,
    manifest_path: &Path,
    request: &SaveRequest,
) -> Result<CmdResult> {
    let content = fs::read_to_string(manifest_path).map_err(DropzoneError::Io)?;
    let uploads = parse_manifest(&content)?;
    save::run(manager, uploads, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UploadErrorCode;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("manifest.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn parses_single_record_and_list() {
        let one = parse_manifest(r#"{"name":"a","tmp_name":"/tmp/a","error":0}"#).unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_manifest(
            r#"[{"name":"a","tmp_name":"/tmp/a"},{"name":"b","tmp_name":"/tmp/b","error":4}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].error, UploadErrorCode::NoFile);
    }

    #[test]
    fn rejects_malformed_manifest() {
        assert!(matches!(
            parse_manifest(r#"{"tmp_name": 3}"#),
            Err(DropzoneError::Serialization(_))
        ));
    }

    #[test]
    fn saves_manifest_uploads() {
        let tmp = TempDir::new().unwrap();
        let uploads = TempDir::new().unwrap();
        let tmp_file = tmp.path().join("phpA1B2");
        fs::write(&tmp_file, "0123456789").unwrap();

        let manifest = write_manifest(
            &tmp,
            &format!(
                r#"[{{"name":"a.txt","type":"text/plain","tmp_name":{},"error":0,"size":10}},
                    {{"name":"b.txt","type":"text/plain","tmp_name":"/nowhere","error":1,"size":0}}]"#,
                serde_json::to_string(&tmp_file).unwrap()
            ),
        );

        let mut manager = UploadManager::new();
        let result = run(&mut manager, &manifest, &SaveRequest::new(uploads.path())).unwrap();

        assert_eq!(result.saved_paths(), vec![&uploads.path().join("a.txt")]);
        assert_eq!(result.failures(), 1);
        assert_eq!(
            result.outcomes[1].error.as_deref(),
            Some("The uploaded file exceeds the maximum allowed size")
        );
        assert!(!tmp_file.exists());
    }

    #[test]
    fn missing_manifest_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let mut manager = UploadManager::new();
        let err = run(
            &mut manager,
            &tmp.path().join("missing.json"),
            &SaveRequest::new(tmp.path()),
        )
        .unwrap_err();
        assert!(matches!(err, DropzoneError::Io(_)));
    }
}
