//! Drivegrab Core Library
//!
//! This library provides the core functionality for the drivegrab tool,
//! which bulk-downloads publicly shared drive folders and files listed in
//! a text file, naming local directories after the remote folder's real
//! title.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`naming`] - Filesystem-safe name sanitization
//! - [`parser`] - Link classification and link-list reading
//! - [`title`] - Best-effort remote folder title scraping
//! - [`backend`] - External download tool wrappers and attempt chains
//! - [`processor`] - Per-link orchestration (classify, name, download)

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod naming;
pub mod parser;
pub mod processor;
pub mod title;

// Re-export commonly used types
pub use backend::{Backend, BackendError, DownloadJob, GdownBackend, RcloneBackend};
pub use config::RunConfig;
pub use naming::{DEFAULT_MAX_NAME_LEN, sanitize_name, sanitize_name_default};
pub use parser::{ClassifiedLink, LinkKind, classify, read_link_list};
pub use processor::{LinkOutcome, LinkProcessor};
pub use title::{TitleError, TitleFetcher};
