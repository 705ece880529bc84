use crate::commands::{CmdMessage, CmdResult, SaveRequest, UploadOutcome};
use crate::error::{DropzoneError, Result};
use crate::uploader::{IntoUpload, UploadManager};

/// Accept, validate and save each upload in turn.
///
/// Rejected uploads are reported in the result; only usage errors (bad target
/// directory, double move) abort the batch.
pub fn run<U: IntoUpload>(
    manager: &mut UploadManager,
    uploads: Vec<U>,
    request: &SaveRequest,
) -> Result<CmdResult> {
    if request.filename.is_some() && uploads.len() > 1 {
        return Err(DropzoneError::Api(
            "A target filename can only be given for a single upload".to_string(),
        ));
    }

    let mut result = CmdResult::default();

    for upload in uploads {
        manager.accept(upload);
        if let Some(accept) = &request.accept {
            manager.validate_mimetype(accept.clone())?;
        }
        let saved_to = manager.save(&request.directory, request.filename.as_deref())?;

        let outcome = outcome_of(manager, saved_to);
        match (&outcome.saved_to, &outcome.error) {
            (Some(path), _) => result.add_message(CmdMessage::success(format!(
                "Saved: {} -> {}",
                outcome.client_filename,
                path.display()
            ))),
            (None, Some(error)) => result.add_message(CmdMessage::error(format!(
                "{}: {}",
                outcome.client_filename, error
            ))),
            (None, None) => {}
        }
        result.outcomes.push(outcome);
    }

    let saved = result.saved_paths().len();
    let failed = result.failures();
    if failed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Saved {} of {} upload(s)",
            saved,
            saved + failed
        )));
    }

    Ok(result)
}

pub(crate) fn outcome_of(
    manager: &UploadManager,
    saved_to: Option<std::path::PathBuf>,
) -> UploadOutcome {
    let (client_filename, media_type) = manager
        .file()
        .map(|f| (f.client_filename().to_string(), f.client_media_type().to_string()))
        .unwrap_or_default();
    UploadOutcome {
        client_filename,
        media_type,
        saved_to,
        error: manager.error().map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::mimetype::Accept;
    use crate::model::UploadErrorCode;
    use crate::upload::memory::fixtures::*;
    use crate::upload::memory::InMemoryUpload;
    use tempfile::TempDir;

    #[test]
    fn saves_every_upload() {
        let dir = TempDir::new().unwrap();
        let mut manager = UploadManager::new();
        let request = SaveRequest::new(dir.path());

        let result = run(
            &mut manager,
            vec![text_upload("a.txt"), text_upload("a.txt"), image_upload("b.png")],
            &request,
        )
        .unwrap();

        assert_eq!(result.failures(), 0);
        assert_eq!(
            result.saved_paths(),
            vec![
                &dir.path().join("a.txt"),
                &dir.path().join("a_1.txt"),
                &dir.path().join("b.png")
            ]
        );
        assert!(result
            .messages
            .iter()
            .all(|m| m.level == MessageLevel::Success));
    }

    #[test]
    fn rejected_uploads_are_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let mut manager = UploadManager::new();
        let request = SaveRequest::new(dir.path()).with_accept(Some(Accept::from("image")));

        let result = run(
            &mut manager,
            vec![
                text_upload("a.txt"),
                image_upload("b.png"),
                errored_upload("c.png", UploadErrorCode::Partial),
            ],
            &request,
        )
        .unwrap();

        assert_eq!(result.failures(), 2);
        assert_eq!(result.saved_paths(), vec![&dir.path().join("b.png")]);
        assert_eq!(
            result.outcomes[0].error.as_deref(),
            Some("The mimetype text/plain is not accepted")
        );
        assert_eq!(
            result.outcomes[2].error.as_deref(),
            Some("The uploaded file was only partially uploaded")
        );
        assert!(!dir.path().join("a.txt").exists());

        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Warning);
        assert_eq!(last.content, "Saved 1 of 3 upload(s)");
    }

    #[test]
    fn filename_applies_to_single_upload() {
        let dir = TempDir::new().unwrap();
        let mut manager = UploadManager::new();
        let request = SaveRequest::new(dir.path()).with_filename(Some("renamed.txt".into()));

        let result = run(&mut manager, vec![text_upload("a.txt")], &request).unwrap();
        assert_eq!(result.saved_paths(), vec![&dir.path().join("renamed.txt")]);
    }

    #[test]
    fn filename_with_many_uploads_is_refused() {
        let dir = TempDir::new().unwrap();
        let mut manager = UploadManager::new();
        let request = SaveRequest::new(dir.path()).with_filename(Some("renamed.txt".into()));

        let uploads: Vec<InMemoryUpload> = vec![text_upload("a.txt"), text_upload("b.txt")];
        assert!(run(&mut manager, uploads, &request).is_err());
        assert!(!dir.path().join("renamed.txt").exists());
    }

    #[test]
    fn bad_directory_aborts_batch() {
        let dir = TempDir::new().unwrap();
        let mut manager = UploadManager::new();
        let request = SaveRequest::new(dir.path().join("missing"));

        let err = run(&mut manager, vec![text_upload("a.txt")], &request).unwrap_err();
        assert!(matches!(err, DropzoneError::NotADirectory(_)));
    }
}
