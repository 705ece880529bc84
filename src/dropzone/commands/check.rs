use crate::commands::save::outcome_of;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::mimetype::Accept;
use crate::uploader::{IntoUpload, UploadManager};

/// Run uploads through accept and mimetype validation without saving them.
pub fn run<U: IntoUpload>(
    manager: &mut UploadManager,
    uploads: Vec<U>,
    accept: &Accept,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for upload in uploads {
        manager.accept(upload).validate_mimetype(accept.clone())?;
        let outcome = outcome_of(manager, None);
        match &outcome.error {
            None => result.add_message(CmdMessage::success(format!(
                "Accepted: {} ({})",
                outcome.client_filename, outcome.media_type
            ))),
            Some(error) => result.add_message(CmdMessage::error(format!(
                "{}: {}",
                outcome.client_filename, error
            ))),
        }
        result.outcomes.push(outcome);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UploadErrorCode;
    use crate::upload::memory::fixtures::*;

    #[test]
    fn reports_each_upload_without_moving() {
        let mut manager = UploadManager::new();
        let uploads = vec![text_upload("a.txt"), image_upload("b.png")];

        let result = run(&mut manager, uploads, &Accept::from("image")).unwrap();

        assert_eq!(result.failures(), 1);
        assert!(result.saved_paths().is_empty());
        assert_eq!(result.messages[0].content, "a.txt: The mimetype text/plain is not accepted");
        assert_eq!(result.messages[1].content, "Accepted: b.png (image/png)");
    }

    #[test]
    fn transport_error_wins_over_mimetype() {
        let mut manager = UploadManager::new();
        let uploads = vec![errored_upload("a.txt", UploadErrorCode::NoTmpDir)];

        let result = run(&mut manager, uploads, &Accept::from("image")).unwrap();
        assert_eq!(
            result.outcomes[0].error.as_deref(),
            Some("Missing a temporary folder")
        );
    }
}
