use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DropzoneError, Result};
use crate::target::{base_name, find_target_filename};
use std::path::Path;

/// Report where an upload named `filename` would land in `directory`.
pub fn run(directory: &Path, filename: &str) -> Result<CmdResult> {
    if !directory.is_dir() {
        return Err(DropzoneError::NotADirectory(directory.to_path_buf()));
    }
    let name = base_name(filename)
        .ok_or_else(|| DropzoneError::Api(format!("Not a usable filename: {:?}", filename)))?;

    let target = find_target_filename(&std::path::absolute(directory)?.join(name))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(target.display().to_string()));
    Ok(result.with_targets(vec![target]))
}
