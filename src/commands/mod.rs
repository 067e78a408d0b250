//! Command implementations for the yay CLI.
//!
//! Each function returns a result type implementing [`Output`] so `main`
//! can print it as JSON or for humans.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{self, Configuration};
use crate::editor::{self, EditorSource};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Effective configuration.
#[derive(Serialize)]
pub struct ConfigShow {
    pub path: Option<PathBuf>,
    pub config: Configuration,
}

impl Output for ConfigShow {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let c = &self.config;
        let mut lines = Vec::new();
        if let Some(ref path) = self.path {
            lines.push(format!("Config file: {}", path.display()));
        }
        lines.push(format!("  buildDir:      {}", c.build_dir.display()));
        lines.push(format!(
            "  editor:        {}",
            if c.editor.is_empty() { "(not set)" } else { c.editor.as_str() }
        ));
        lines.push(format!("  makepkgbin:    {}", c.makepkg_bin.display()));
        lines.push(format!("  noconfirm:     {}", c.no_confirm));
        lines.push(format!("  devel:         {}", c.devel));
        lines.push(format!("  pacmanbin:     {}", c.pacman_bin.display()));
        lines.push(format!("  pacmanconf:    {}", c.pacman_conf.display()));
        lines.push(format!("  requestsplitn: {}", c.request_split_n));
        lines.push(format!("  sortmode:      {}", c.sort_mode));
        lines.push(format!("  tarbin:        {}", c.tar_bin.display()));
        lines.push(format!("  timeupdate:    {}", c.time_update));
        lines.join("\n")
    }
}

pub fn config_show(config: &Configuration, path: Option<&Path>) -> ConfigShow {
    ConfigShow {
        path: path.map(Path::to_path_buf),
        config: config.clone(),
    }
}

/// Location of the config file.
#[derive(Serialize)]
pub struct ConfigPath {
    pub path: PathBuf,
    pub exists: bool,
}

impl Output for ConfigPath {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        if self.exists {
            self.path.display().to_string()
        } else {
            format!("{} (not created yet)", self.path.display())
        }
    }
}

pub fn config_path(path: &Path) -> ConfigPath {
    ConfigPath {
        path: path.to_path_buf(),
        exists: path.exists(),
    }
}

/// Result of writing the config file.
#[derive(Serialize)]
pub struct ConfigSaved {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Output for ConfigSaved {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        match (&self.key, &self.value) {
            (Some(key), Some(value)) => {
                format!("Set {} = {} in {}", key, value, self.path.display())
            }
            _ => format!("Saved config to {}", self.path.display()),
        }
    }
}

pub fn config_save(config: &mut Configuration, path: &Path) -> Result<ConfigSaved> {
    config::save(config, path)?;
    Ok(ConfigSaved {
        path: path.to_path_buf(),
        key: None,
        value: None,
    })
}

/// Update one key of the effective configuration and save it.
///
/// `noconfirm` is refused: saving always resets it.
pub fn config_set(
    config: &mut Configuration,
    path: &Path,
    key: &str,
    value: &str,
) -> Result<ConfigSaved> {
    if key == "noconfirm" {
        return Err(Error::InvalidInput(
            "noconfirm is never persisted; pass --noconfirm instead".to_string(),
        ));
    }
    config.set(key, value)?;
    config::save(config, path)?;
    Ok(ConfigSaved {
        path: path.to_path_buf(),
        key: Some(key.to_string()),
        value: Some(value.to_string()),
    })
}

/// Summary of the native package manager config.
#[derive(Serialize)]
pub struct PacmanConfSummary {
    pub path: PathBuf,
    pub root_dir: String,
    pub db_path: String,
    pub repos: Vec<String>,
}

impl Output for PacmanConfSummary {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("pacman.conf: {}", self.path.display()),
            format!("  RootDir: {}", self.root_dir),
            format!("  DBPath:  {}", self.db_path),
        ];
        if self.repos.is_empty() {
            lines.push("  Repositories: (none)".to_string());
        } else {
            lines.push(format!("  Repositories: {}", self.repos.join(", ")));
        }
        lines.join("\n")
    }
}

pub fn pacman_conf(config: &Configuration) -> Result<PacmanConfSummary> {
    let conf = config::read_alpm_config(&config.pacman_conf)?;
    Ok(PacmanConfSummary {
        path: config.pacman_conf.clone(),
        root_dir: conf.root_dir.clone(),
        db_path: conf.db_path.clone(),
        repos: conf.repos.iter().map(|r| r.name.clone()).collect(),
    })
}

/// The editor that build files would be opened with.
#[derive(Serialize)]
pub struct EditorShow {
    pub path: PathBuf,
    pub source: String,
}

impl Output for EditorShow {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!("{} (from {})", self.path.display(), self.source)
    }
}

pub fn editor_show(config: &Configuration) -> EditorShow {
    let resolved = editor::resolve_editor(config);
    EditorShow {
        path: resolved.value,
        source: resolved.source.to_string(),
    }
}

/// Resolve the editor and open `files` in it.
pub fn edit(config: &Configuration, files: &[PathBuf]) -> Result<EditorSource> {
    let resolved = editor::resolve_editor(config);
    editor::launch_editor(&resolved.value, files)?;
    Ok(resolved.source)
}
