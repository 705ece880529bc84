//! Collision-free target paths.
//!
//! `find_target_filename` probes the filesystem and appends `_1`, `_2`, ... to
//! the file stem until it finds a free name. The probe and the later move are
//! not atomic: two writers racing into the same directory can both pick the
//! same name, and the second move then replaces the first file. No locking is
//! taken.

use crate::error::{DropzoneError, Result};
use std::path::{Path, PathBuf};

/// Highest suffix tried before giving up.
pub const MAX_SUFFIX: u32 = 100_000;

/// Return `target` if nothing exists there, else the first free
/// `{stem}_{n}{.ext}` sibling.
pub fn find_target_filename(target: &Path) -> Result<PathBuf> {
    find_target_filename_within(target, MAX_SUFFIX)
}

fn find_target_filename_within(target: &Path, max_suffix: u32) -> Result<PathBuf> {
    if !target.exists() {
        return Ok(target.to_path_buf());
    }

    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = target
        .extension()
        .map(|e| e.to_string_lossy().into_owned());

    for i in 1..=max_suffix {
        let candidate = match &extension {
            Some(ext) => parent.join(format!("{}_{}.{}", stem, i, ext)),
            None => parent.join(format!("{}_{}", stem, i)),
        };
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(DropzoneError::NoFreeFilename(target.to_path_buf()))
}

/// Strip any directory part from a client-supplied name.
///
/// Returns `None` when nothing usable is left (empty, `.`, `..`, or a path
/// ending in a separator).
pub fn base_name(name: &str) -> Option<String> {
    // Clients on Windows send backslash-separated paths.
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match last {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}
