//! yay - configuration and interactive-control layer of an AUR helper.
//!
//! This library provides the pieces the `yay` front-end shares with its
//! higher-level workflows: the persisted [`config::Configuration`], editor
//! resolution for build-file review, the yes/no confirmation gate, and
//! delegation of package-manager operations to the native binary.

use std::path::PathBuf;
use std::process::ExitStatus;

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod logging;
pub mod pacman;
pub mod prompt;
pub mod sys;

/// Version reported by the front-end.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default address of the AUR.
pub const AUR_BASE_URL: &str = "https://aur.archlinux.org";

/// Library-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot determine the current user: {0}")]
    IdentityUnavailable(String),

    #[error("Cannot determine the home directory: $HOME is not set")]
    HomeUnavailable,

    #[error("Config file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save config to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {}: {source}", path.display())]
    NativeConfigOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    NativeConfigParse {
        path: PathBuf,
        #[source]
        source: pacmanconf::Error,
    },

    #[error("exec: \"{name}\": {source}")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("Failed to run {program}: {source}")]
    ChildProcess {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ChildExit { program: String, status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for yay operations.
pub type Result<T> = std::result::Result<T, Error>;
