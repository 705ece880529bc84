//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for clients (the bundled CLI, a web handler, tests).
//!
//! It:
//! - **Fills in defaults** from [`DropzoneConfig`]: upload directory, accept
//!   filter and mimetype aliases
//! - **Builds** a fresh [`UploadManager`] per call, so no state leaks between
//!   batches
//! - **Dispatches** to `commands/*.rs` and returns `Result<CmdResult>`
//!
//! It never prints and never exits.

use crate::commands::{self, SaveRequest};
use crate::config::DropzoneConfig;
use crate::error::{DropzoneError, Result};
use crate::mimetype::Accept;
use crate::uploader::{IntoUpload, UploadManager};
use std::path::{Path, PathBuf};

/// Per-call options; anything left empty falls back to configuration.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub directory: Option<PathBuf>,
    pub accept: Vec<String>,
    pub filename: Option<String>,
}

pub struct DropzoneApi {
    config: DropzoneConfig,
    paths: commands::DropzonePaths,
}

impl DropzoneApi {
    pub fn new(config: DropzoneConfig, paths: commands::DropzonePaths) -> Self {
        Self { config, paths }
    }

    /// Build the API with the configuration stored under `paths`.
    pub fn load(paths: commands::DropzonePaths) -> Result<Self> {
        let config = DropzoneConfig::load(&paths.config_dir)?;
        Ok(Self::new(config, paths))
    }

    pub fn save_uploads<U: IntoUpload>(
        &self,
        uploads: Vec<U>,
        options: SaveOptions,
    ) -> Result<commands::CmdResult> {
        let request = self.save_request(options)?;
        commands::save::run(&mut self.manager(), uploads, &request)
    }

    pub fn receive(&self, manifest: &Path, options: SaveOptions) -> Result<commands::CmdResult> {
        let request = self.save_request(options)?;
        commands::receive::run(&mut self.manager(), manifest, &request)
    }

    pub fn check_uploads<U: IntoUpload>(
        &self,
        uploads: Vec<U>,
        accept: &[String],
    ) -> Result<commands::CmdResult> {
        let accept = self.accept_filter(accept).ok_or_else(|| {
            DropzoneError::Api(
                "Nothing to check against: pass an accept filter or configure one".to_string(),
            )
        })?;
        commands::check::run(&mut self.manager(), uploads, &accept)
    }

    pub fn find_target(&self, directory: &Path, filename: &str) -> Result<commands::CmdResult> {
        commands::target::run(directory, filename)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn current_config(&self) -> &DropzoneConfig {
        &self.config
    }

    pub fn paths(&self) -> &commands::DropzonePaths {
        &self.paths
    }

    fn manager(&self) -> UploadManager {
        UploadManager::with_aliases(self.config.aliases())
    }

    fn accept_filter(&self, accept: &[String]) -> Option<Accept> {
        Accept::from_values(accept).or_else(|| self.config.default_accept())
    }

    fn save_request(&self, options: SaveOptions) -> Result<SaveRequest> {
        let directory = options
            .directory
            .or_else(|| self.config.upload_dir.clone())
            .ok_or_else(|| {
                DropzoneError::Api(
                    "No upload directory given and none configured (set upload-dir)".to_string(),
                )
            })?;
        Ok(SaveRequest::new(directory)
            .with_accept(self.accept_filter(&options.accept))
            .with_filename(options.filename))
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, DropzonePaths, MessageLevel, UploadOutcome};
