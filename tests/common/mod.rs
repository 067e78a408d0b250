//! Common test utilities for yay integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's `~/.config/yay/` directory or inherit their editor settings.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with an isolated home directory.
///
/// The `yay()` method returns a `Command` with `HOME` pointed at the
/// temporary directory and `YAY_CONFIG`, `EDITOR`, `VISUAL` cleared, making
/// tests parallel-safe.
pub struct TestEnv {
    pub home_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an empty home directory.
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the yay binary with an isolated home.
    pub fn yay(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_yay"));
        cmd.current_dir(self.home_dir.path());
        cmd.env("HOME", self.home_dir.path());
        cmd.env_remove("YAY_CONFIG");
        cmd.env_remove("EDITOR");
        cmd.env_remove("VISUAL");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Get the path to the home directory.
    pub fn home(&self) -> &Path {
        self.home_dir.path()
    }

    /// Location yay reads its config from in this environment.
    pub fn config_file(&self) -> PathBuf {
        self.home().join(".config").join("yay").join("config.json")
    }

    /// Write raw content to the config file.
    pub fn write_config(&self, content: &str) {
        let path = self.config_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Read the config file as JSON.
    pub fn read_config(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.config_file()).expect("config file missing");
        serde_json::from_str(&content).expect("config file is not JSON")
    }

    /// Create an executable shell script in the home directory.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.home().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
