//! Schema of the persisted `config.json`.
//!
//! This module provides:
//! - The [`Configuration`] record and its built-in defaults
//! - [`SortMode`] / [`SearchMode`] enums
//! - [`ConfigOverlay`], the partial view used to merge a file onto defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Display order for numbered package menus.
///
/// Persisted as its integer code so existing config files stay readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SortMode {
    /// Best match printed last, closest to the prompt
    #[default]
    BottomUp,
    /// Best match printed first
    TopDown,
}

impl SortMode {
    /// Parse from string, case-insensitive. Accepts names and integer codes.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bottomup" | "0" => Some(SortMode::BottomUp),
            "topdown" | "1" => Some(SortMode::TopDown),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::BottomUp => "bottomup",
            SortMode::TopDown => "topdown",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<SortMode> for u8 {
    fn from(mode: SortMode) -> Self {
        match mode {
            SortMode::BottomUp => 0,
            SortMode::TopDown => 1,
        }
    }
}

impl TryFrom<u8> for SortMode {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(SortMode::BottomUp),
            1 => Ok(SortMode::TopDown),
            other => Err(format!("sortmode must be 0 or 1, got {}", other)),
        }
    }
}

/// Verbosity of search results. Runtime only, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    NumberMenu,
    Detailed,
    Minimal,
}

/// Runtime and persisted settings.
///
/// Built once at startup and passed by reference to whatever needs it.
/// `shell` and `search_mode` are runtime only and never serialized.
///
/// # JSON Schema
///
/// ```json
/// {
///     "buildDir": "/tmp/yaytmp-1000/",
///     "editor": "",
///     "makepkgbin": "/usr/bin/makepkg",
///     "noconfirm": false,
///     "devel": false,
///     "pacmanbin": "/usr/bin/pacman",
///     "pacmanconf": "/etc/pacman.conf",
///     "requestsplitn": 150,
///     "sortmode": 0,
///     "tarbin": "/usr/bin/bsdtar",
///     "timeupdate": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    #[serde(rename = "buildDir")]
    pub build_dir: PathBuf,

    /// Forced editor executable; empty means not forced
    pub editor: String,

    #[serde(rename = "makepkgbin")]
    pub makepkg_bin: PathBuf,

    #[serde(skip)]
    pub shell: String,

    /// Auto-accept every confirmation prompt for this run
    #[serde(rename = "noconfirm")]
    pub no_confirm: bool,

    pub devel: bool,

    #[serde(rename = "pacmanbin")]
    pub pacman_bin: PathBuf,

    #[serde(rename = "pacmanconf")]
    pub pacman_conf: PathBuf,

    /// Batch size for split AUR requests
    #[serde(rename = "requestsplitn")]
    pub request_split_n: usize,

    #[serde(skip)]
    pub search_mode: SearchMode,

    #[serde(rename = "sortmode")]
    pub sort_mode: SortMode,

    #[serde(rename = "tarbin")]
    pub tar_bin: PathBuf,

    #[serde(rename = "timeupdate")]
    pub time_update: bool,
}

/// Default batch size for split AUR requests.
pub const DEFAULT_REQUEST_SPLIT_N: usize = 150;

/// Default location of the native package manager's config.
pub const DEFAULT_PACMAN_CONF: &str = "/etc/pacman.conf";

impl Configuration {
    /// Built-in defaults for the invoking user.
    ///
    /// Fails only with [`Error::IdentityUnavailable`]; the binary treats that
    /// as fatal because the build directory is namespaced by uid.
    pub fn default_settings() -> Result<Self> {
        let user = crate::sys::current_user()?;
        Ok(Self::for_uid(user.uid))
    }

    /// Built-in defaults with the build directory namespaced by `uid`.
    pub fn for_uid(uid: u32) -> Self {
        Self {
            build_dir: PathBuf::from(format!("/tmp/yaytmp-{}/", uid)),
            editor: String::new(),
            makepkg_bin: PathBuf::from("/usr/bin/makepkg"),
            shell: String::new(),
            no_confirm: false,
            devel: false,
            pacman_bin: PathBuf::from("/usr/bin/pacman"),
            pacman_conf: PathBuf::from(DEFAULT_PACMAN_CONF),
            request_split_n: DEFAULT_REQUEST_SPLIT_N,
            search_mode: SearchMode::NumberMenu,
            sort_mode: SortMode::BottomUp,
            tar_bin: PathBuf::from("/usr/bin/bsdtar"),
            time_update: false,
        }
    }

    /// Set a persisted key from its string form.
    ///
    /// Keys are the JSON names (`buildDir`, `sortmode`, ...).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_bool = |v: &str| -> Result<bool> {
            match v.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(Error::InvalidInput(format!(
                    "{} expects true or false, got '{}'",
                    key, v
                ))),
            }
        };
        let parse_path = |v: &str| -> Result<PathBuf> {
            let path = PathBuf::from(v);
            if path.is_absolute() {
                Ok(path)
            } else {
                Err(Error::InvalidInput(format!(
                    "{} must be an absolute path, got '{}'",
                    key, v
                )))
            }
        };

        match key {
            "buildDir" => self.build_dir = parse_path(value)?,
            "editor" => self.editor = value.to_string(),
            "makepkgbin" => self.makepkg_bin = parse_path(value)?,
            "noconfirm" => self.no_confirm = parse_bool(value)?,
            "devel" => self.devel = parse_bool(value)?,
            "pacmanbin" => self.pacman_bin = parse_path(value)?,
            "pacmanconf" => self.pacman_conf = parse_path(value)?,
            "requestsplitn" => {
                self.request_split_n = value.parse().map_err(|_| {
                    Error::InvalidInput(format!(
                        "requestsplitn expects a positive integer, got '{}'",
                        value
                    ))
                })?
            }
            "sortmode" => {
                self.sort_mode = SortMode::parse(value).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "sortmode expects bottomup or topdown, got '{}'",
                        value
                    ))
                })?
            }
            "tarbin" => self.tar_bin = parse_path(value)?,
            "timeupdate" => self.time_update = parse_bool(value)?,
            _ => return Err(Error::InvalidInput(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

/// Partial view of `config.json`.
///
/// Every field is optional so a file only overrides the keys it contains.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverlay {
    #[serde(rename = "buildDir")]
    pub build_dir: Option<PathBuf>,
    pub editor: Option<String>,
    #[serde(rename = "makepkgbin")]
    pub makepkg_bin: Option<PathBuf>,
    #[serde(rename = "noconfirm")]
    pub no_confirm: Option<bool>,
    pub devel: Option<bool>,
    #[serde(rename = "pacmanbin")]
    pub pacman_bin: Option<PathBuf>,
    #[serde(rename = "pacmanconf")]
    pub pacman_conf: Option<PathBuf>,
    #[serde(rename = "requestsplitn")]
    pub request_split_n: Option<usize>,
    #[serde(rename = "sortmode")]
    pub sort_mode: Option<SortMode>,
    #[serde(rename = "tarbin")]
    pub tar_bin: Option<PathBuf>,
    #[serde(rename = "timeupdate")]
    pub time_update: Option<bool>,
}

impl ConfigOverlay {
    /// Apply every present field onto `config`.
    pub fn merge_into(self, config: &mut Configuration) {
        if let Some(v) = self.build_dir {
            config.build_dir = v;
        }
        if let Some(v) = self.editor {
            config.editor = v;
        }
        if let Some(v) = self.makepkg_bin {
            config.makepkg_bin = v;
        }
        if let Some(v) = self.no_confirm {
            config.no_confirm = v;
        }
        if let Some(v) = self.devel {
            config.devel = v;
        }
        if let Some(v) = self.pacman_bin {
            config.pacman_bin = v;
        }
        if let Some(v) = self.pacman_conf {
            config.pacman_conf = v;
        }
        if let Some(v) = self.request_split_n {
            config.request_split_n = v;
        }
        if let Some(v) = self.sort_mode {
            config.sort_mode = v;
        }
        if let Some(v) = self.tar_bin {
            config.tar_bin = v;
        }
        if let Some(v) = self.time_update {
            config.time_update = v;
        }
    }
}

/// Required permissions for config.json (Unix: 0644, readable by all).
#[cfg(unix)]
pub const CONFIG_FILE_MODE: u32 = 0o644;
