use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dropzone", version)]
#[command(about = "Accept, validate and store uploaded files without clobbering", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store local files as if they had just been uploaded
    #[command(alias = "s")]
    Save {
        /// Files to store
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Target directory (defaults to the configured upload-dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Accepted mimetypes or one alias (image, text, ...)
        #[arg(short, long)]
        accept: Vec<String>,

        /// Store under this name instead (single file only)
        #[arg(short, long)]
        name: Option<String>,

        /// Client media type to report instead of guessing from the extension
        #[arg(long = "type")]
        media_type: Option<String>,

        /// Move the original files instead of copying them first
        #[arg(long = "move")]
        move_source: bool,
    },

    /// Store uploads described by a JSON manifest of form records
    #[command(alias = "r")]
    Receive {
        /// Manifest with {name, type, tmp_name, error, size} records
        manifest: PathBuf,

        /// Target directory (defaults to the configured upload-dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Accepted mimetypes or one alias (image, text, ...)
        #[arg(short, long)]
        accept: Vec<String>,
    },

    /// Check files against an accept filter without storing them
    #[command(alias = "c")]
    Check {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Accepted mimetypes or one alias (defaults to the configured accept)
        #[arg(short, long)]
        accept: Vec<String>,

        /// Client media type to report instead of guessing from the extension
        #[arg(long = "type")]
        media_type: Option<String>,
    },

    /// Print the path a file would be stored under
    Target {
        dir: PathBuf,
        filename: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (upload-dir, accept, alias.<name>)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
