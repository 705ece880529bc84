use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use dropzone::api::{
    CmdMessage, CmdResult, ConfigAction, DropzoneApi, DropzonePaths, MessageLevel, SaveOptions,
};
use dropzone::error::{DropzoneError, Result};
use dropzone::upload::fs::TempFileUpload;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

const CONFIG_DIR_ENV: &str = "DROPZONE_CONFIG_DIR";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut api = DropzoneApi::load(resolve_paths()?)?;

    match cli.command {
        Commands::Save {
            files,
            dir,
            accept,
            name,
            media_type,
            move_source,
        } => handle_save(
            &api,
            files,
            SaveOptions {
                directory: dir,
                accept,
                filename: name,
            },
            media_type,
            move_source,
        ),
        Commands::Receive {
            manifest,
            dir,
            accept,
        } => handle_receive(
            &api,
            &manifest,
            SaveOptions {
                directory: dir,
                accept,
                filename: None,
            },
        ),
        Commands::Check {
            files,
            accept,
            media_type,
        } => handle_check(&api, files, accept, media_type),
        Commands::Target { dir, filename } => handle_target(&api, &dir, &filename),
        Commands::Config { key, value } => handle_config(&mut api, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "dropzone=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_paths() -> Result<DropzonePaths> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(DropzonePaths {
            config_dir: PathBuf::from(dir),
        });
    }
    let proj_dirs = ProjectDirs::from("com", "dropzone", "dropzone")
        .ok_or_else(|| DropzoneError::Config("Could not determine config dir".into()))?;
    Ok(DropzonePaths {
        config_dir: proj_dirs.config_dir().to_path_buf(),
    })
}

fn handle_save(
    api: &DropzoneApi,
    files: Vec<PathBuf>,
    options: SaveOptions,
    media_type: Option<String>,
    move_source: bool,
) -> Result<()> {
    let keep_source = !move_source;
    let (uploads, staged) = stage_all(&files, keep_source, media_type.as_deref())?;

    let result = api.save_uploads(uploads, options);
    // Rejected uploads leave their staged copies behind.
    for path in staged {
        if path.exists() {
            let _ = std::fs::remove_file(path);
        }
    }

    finish(result?)
}

fn handle_receive(api: &DropzoneApi, manifest: &Path, options: SaveOptions) -> Result<()> {
    let result = api.receive(manifest, options)?;
    finish(result)
}

fn handle_check(
    api: &DropzoneApi,
    files: Vec<PathBuf>,
    accept: Vec<String>,
    media_type: Option<String>,
) -> Result<()> {
    // Nothing is moved, so the originals can be referenced directly.
    let (uploads, _) = stage_all(&files, false, media_type.as_deref())?;
    let result = api.check_uploads(uploads, &accept)?;
    finish(result)
}

fn handle_target(api: &DropzoneApi, dir: &Path, filename: &str) -> Result<()> {
    let result = api.find_target(dir, filename)?;
    for target in &result.targets {
        println!("{}", target.display());
    }
    Ok(())
}

fn handle_config(api: &mut DropzoneApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for (key, value) in config.entries() {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Stage every file, removing already-staged copies if one fails.
fn stage_all(
    files: &[PathBuf],
    keep_source: bool,
    media_type: Option<&str>,
) -> Result<(Vec<TempFileUpload>, Vec<PathBuf>)> {
    let mut uploads = Vec::with_capacity(files.len());
    let mut staged = Vec::new();

    for file in files {
        match TempFileUpload::stage(file, keep_source, media_type) {
            Ok(upload) => {
                if keep_source {
                    staged.push(upload.tmp_path().to_path_buf());
                }
                uploads.push(upload);
            }
            Err(e) => {
                for upload in uploads {
                    if keep_source {
                        let _ = upload.discard();
                    }
                }
                return Err(e);
            }
        }
    }

    Ok((uploads, staged))
}

fn finish(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    match result.failures() {
        0 => Ok(()),
        n => Err(DropzoneError::Api(format!("{} upload(s) rejected", n))),
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
