//! Configuration for yay.
//!
//! ## config.json - User preferences
//!
//! Located at `~/.config/yay/config.json` (override with `YAY_CONFIG`).
//!
//! Contains the build directory, the forced editor, the paths of the
//! external tools (`makepkg`, `pacman`, `bsdtar`), the `pacman.conf`
//! location, and a handful of behaviour flags. Runtime-only fields
//! (`shell`, search mode) are never written.
//!
//! ## Lifecycle
//!
//! Defaults are built once at startup from the invoking user's uid, the
//! file is overlaid on top, and the result is passed by reference for the
//! rest of the run. The file is written back only on an explicit save,
//! which always resets `noconfirm` to `false`.
//!
//! ## pacman.conf
//!
//! [`read_alpm_config`] parses the native package manager's config with
//! `pacmanconf`; this crate does not validate it beyond that.

pub mod schema;
pub mod store;

#[cfg(unix)]
pub use schema::CONFIG_FILE_MODE;
pub use schema::{ConfigOverlay, Configuration, SearchMode, SortMode};
pub use store::{
    CONFIG_PATH_ENV, config_path, load, load_or_default, read_alpm_config, save, to_pretty_json,
};
