use crate::config::DropzoneConfig;
use crate::mimetype::Accept;
use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod receive;
pub mod save;
pub mod target;

#[derive(Debug, Clone)]
pub struct DropzonePaths {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of running one upload through the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub client_filename: String,
    pub media_type: String,
    /// Where the file landed; `None` for rejected uploads and dry checks.
    pub saved_to: Option<PathBuf>,
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcomes: Vec<UploadOutcome>,
    pub targets: Vec<PathBuf>,
    pub config: Option<DropzoneConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_targets(mut self, targets: Vec<PathBuf>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_config(mut self, config: DropzoneConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn saved_paths(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| o.saved_to.as_ref())
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }
}

/// Where and how to save a batch of uploads.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub directory: PathBuf,
    pub accept: Option<Accept>,
    /// Only honoured for single-upload batches.
    pub filename: Option<String>,
}

impl SaveRequest {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            accept: None,
            filename: None,
        }
    }

    pub fn with_accept(mut self, accept: Option<Accept>) -> Self {
        self.accept = accept;
        self
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }
}
