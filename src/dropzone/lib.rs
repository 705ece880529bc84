//! # Dropzone Architecture
//!
//! Dropzone is a **UI-agnostic upload-handling library**: it takes files a
//! client has just uploaded, checks them, and moves them into a target
//! directory under a name that does not clobber what is already there. The
//! bundled `dropzone` binary is one client of the library, not the point.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, stages local files, prints messages    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Fills in configured defaults                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Batches: save, receive, check, target, config            │
//! │  - Returns CmdResult with outcomes and leveled messages     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (uploader.rs, target.rs, mimetype.rs)                 │
//! │  - UploadManager: accept → validate → save, sticky error    │
//! │  - Collision-free target names                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Upload Sources (upload/)                                   │
//! │  - UploadedFile trait                                       │
//! │  - TempFileUpload (production), InMemoryUpload (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors
//!
//! Two channels:
//! - misuse and infrastructure failures are `Err(DropzoneError)`;
//! - a bad upload (transport error code, wrong mimetype, failed move) is
//!   recorded on the manager and surfaced as a message, so a caller can show
//!   it to the user without any error handling.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Batch operations over the manager
//! - [`uploader`]: The upload manager
//! - [`target`]: Collision resolution
//! - [`mimetype`]: Accept filters and aliases
//! - [`upload`]: Upload source trait and implementations
//! - [`model`]: Upload error codes and raw form records
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod mimetype;
pub mod model;
pub mod target;
pub mod upload;
pub mod uploader;
