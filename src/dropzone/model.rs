use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;

/// Outcome reported by the transport that received an upload.
///
/// The numeric values follow the usual form-upload convention, where both
/// `1` (server limit) and `2` (form limit) mean the file was too large and
/// `5` is unassigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UploadErrorCode {
    #[default]
    Ok,
    TooLarge,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    Extension,
    Unknown(i64),
}

impl UploadErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            1 | 2 => Self::TooLarge,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTmpDir,
            7 => Self::CantWrite,
            8 => Self::Extension,
            other => Self::Unknown(other),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Human-readable message for the code.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Ok => "There is no error, the file uploaded with success",
            Self::TooLarge => "The uploaded file exceeds the maximum allowed size",
            Self::Partial => "The uploaded file was only partially uploaded",
            Self::NoFile => "No file was uploaded",
            Self::NoTmpDir => "Missing a temporary folder",
            Self::CantWrite => "Failed to write file to disk",
            Self::Extension => "An extension stopped the file upload",
            Self::Unknown(_) => "Unknown upload error",
        }
    }
}

impl fmt::Display for UploadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// Anything in the error slot that is not an integer maps to Unknown rather
// than rejecting the record.
impl<'de> Deserialize<'de> for UploadErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCode {
            Number(i64),
            Text(String),
            Other(serde_json::Value),
        }

        Ok(match RawCode::deserialize(deserializer)? {
            RawCode::Number(n) => Self::from_code(n),
            RawCode::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => Self::from_code(n),
                Err(_) => Self::Unknown(-1),
            },
            RawCode::Other(_) => Self::Unknown(-1),
        })
    }
}

/// One form-submitted file exactly as the transport describes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUpload {
    pub name: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
    pub tmp_name: PathBuf,
    #[serde(default)]
    pub error: UploadErrorCode,
    #[serde(default)]
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert_eq!(UploadErrorCode::from_code(0), UploadErrorCode::Ok);
        assert_eq!(UploadErrorCode::from_code(1), UploadErrorCode::TooLarge);
        assert_eq!(UploadErrorCode::from_code(2), UploadErrorCode::TooLarge);
        assert_eq!(UploadErrorCode::from_code(4), UploadErrorCode::NoFile);
        assert_eq!(UploadErrorCode::from_code(8), UploadErrorCode::Extension);
    }

    #[test]
    fn unassigned_codes_are_unknown() {
        assert_eq!(UploadErrorCode::from_code(5), UploadErrorCode::Unknown(5));
        assert_eq!(
            UploadErrorCode::from_code(42).message(),
            "Unknown upload error"
        );
    }

    #[test]
    fn deserializes_form_record() {
        let raw: RawUpload = serde_json::from_str(
            r#"{"name":"a.txt","type":"text/plain","tmp_name":"/tmp/php123","error":0,"size":10}"#,
        )
        .unwrap();
        assert_eq!(raw.name, "a.txt");
        assert_eq!(raw.media_type, "text/plain");
        assert_eq!(raw.error, UploadErrorCode::Ok);
        assert_eq!(raw.size, 10);
    }

    #[test]
    fn non_numeric_error_slot_is_unknown() {
        let raw: RawUpload = serde_json::from_str(
            r#"{"name":"a.txt","type":"text/plain","tmp_name":"/tmp/x","error":"noExistingErrorCode"}"#,
        )
        .unwrap();
        assert_eq!(raw.error, UploadErrorCode::Unknown(-1));
        assert_eq!(raw.error.message(), "Unknown upload error");
    }

    #[test]
    fn numeric_string_error_slot_is_parsed() {
        let raw: RawUpload =
            serde_json::from_str(r#"{"name":"a","tmp_name":"/tmp/x","error":"3"}"#).unwrap();
        assert_eq!(raw.error, UploadErrorCode::Partial);
        assert_eq!(raw.size, 0);
    }
}
