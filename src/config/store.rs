//! Loading and persisting `config.json`, and reading the native
//! package manager's `pacman.conf`.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::schema::{ConfigOverlay, Configuration};
use crate::{Error, Result};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "YAY_CONFIG";

/// Location of the config file relative to `$HOME`.
const CONFIG_RELATIVE_PATH: &str = ".config/yay/config.json";

/// Resolve the config file path.
///
/// `YAY_CONFIG` wins when set and non-empty, otherwise
/// `$HOME/.config/yay/config.json`.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let home = dirs::home_dir().ok_or(Error::HomeUnavailable)?;
    Ok(home.join(CONFIG_RELATIVE_PATH))
}

/// Read `path` and overlay it onto `base`.
///
/// A missing file is [`Error::ConfigMissing`] so callers can fall back to
/// `base` unchanged. Malformed JSON is [`Error::ConfigParse`].
pub fn load(path: &Path, base: Configuration) -> Result<Configuration> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ConfigMissing(path.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let overlay: ConfigOverlay =
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut config = base;
    overlay.merge_into(&mut config);
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Read `path` onto `base`, treating a missing file as "use `base`".
pub fn load_or_default(path: &Path, base: Configuration) -> Result<Configuration> {
    match load(path, base.clone()) {
        Err(Error::ConfigMissing(_)) => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(base)
        }
        other => other,
    }
}

/// Render `config` the way it is written to disk (tab-indented JSON).
pub fn to_pretty_json(config: &Configuration) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config.serialize(&mut ser)?;
    Ok(buf)
}

/// Persist `config` to `path`.
///
/// `no_confirm` is forced off first: a one-off "don't ask" never becomes
/// the permanent default. The parent directory is created if needed and
/// the file is truncated, fully written, and synced before returning.
/// Every failure, including a path field that cannot be rendered as JSON,
/// is [`Error::Persistence`].
pub fn save(config: &mut Configuration, path: &Path) -> Result<()> {
    config.no_confirm = false;

    let persistence = |source: std::io::Error| Error::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let content = to_pretty_json(config).map_err(|e| persistence(e.into()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(persistence)?;
        }
    }

    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(super::schema::CONFIG_FILE_MODE);
    }

    let mut file = options.open(path).map_err(persistence)?;
    file.write_all(&content).map_err(persistence)?;
    file.sync_all().map_err(persistence)?;
    debug!(path = %path.display(), bytes = content.len(), "saved config");
    Ok(())
}

/// Open the native package manager config and hand it to `pacmanconf`.
///
/// Open and read failures are [`Error::NativeConfigOpen`]; anything the
/// parser rejects is [`Error::NativeConfigParse`].
pub fn read_alpm_config(path: &Path) -> Result<pacmanconf::Config> {
    let open_err = |source: std::io::Error| Error::NativeConfigOpen {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(open_err)?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(open_err)?;

    content
        .parse::<pacmanconf::Config>()
        .map_err(|source| Error::NativeConfigParse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{SearchMode, SortMode};
    use serial_test::serial;
    use tempfile::TempDir;

    fn sample_config() -> Configuration {
        let mut config = Configuration::for_uid(1000);
        config.editor = "nvim".to_string();
        config.devel = true;
        config.time_update = true;
        config.request_split_n = 75;
        config.sort_mode = SortMode::TopDown;
        config.pacman_bin = PathBuf::from("/opt/bin/pacman");
        config
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");

        let mut original = sample_config();
        original.no_confirm = true;
        original.shell = "/bin/zsh".to_string();
        original.search_mode = SearchMode::Detailed;
        let before_save = original.clone();

        save(&mut original, &path).unwrap();
        assert!(!original.no_confirm);

        let loaded = load(&path, Configuration::for_uid(1000)).unwrap();

        let mut expected = before_save;
        expected.no_confirm = false;
        expected.shell = String::new();
        expected.search_mode = SearchMode::NumberMenu;
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_save_writes_all_recognized_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        save(&mut Configuration::for_uid(1000), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "buildDir",
            "editor",
            "makepkgbin",
            "noconfirm",
            "devel",
            "pacmanbin",
            "pacmanconf",
            "requestsplitn",
            "sortmode",
            "tarbin",
            "timeupdate",
        ] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert!(!obj.contains_key("shell"));
        assert!(!obj.contains_key("searchMode"));
    }

    #[test]
    fn test_save_is_tab_indented() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        save(&mut Configuration::for_uid(1000), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n\t\"buildDir\""));
    }

    #[test]
    fn test_save_truncates_longer_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "x".repeat(4096)).unwrap();

        save(&mut Configuration::for_uid(1000), &path).unwrap();
        let loaded = load(&path, Configuration::for_uid(7)).unwrap();
        assert_eq!(loaded, Configuration::for_uid(1000));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".config").join("yay").join("config.json");
        save(&mut Configuration::for_uid(1000), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_save_file_mode() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        save(&mut Configuration::for_uid(1000), &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask can only remove bits
        assert_eq!(mode & !0o644, 0);
    }

    #[test]
    fn test_save_to_directory_is_persistence_error() {
        let tmp = TempDir::new().unwrap();
        let result = save(&mut Configuration::for_uid(1000), tmp.path());
        assert!(matches!(result, Err(Error::Persistence { .. })));
    }

    #[test]
    #[cfg(unix)]
    fn test_save_unrenderable_path_is_persistence_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        let mut config = Configuration::for_uid(1000);
        config.build_dir = PathBuf::from(OsStr::from_bytes(b"/tmp/\xffbuild"));

        let result = save(&mut config, &path);
        assert!(matches!(result, Err(Error::Persistence { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");
        let result = load(&path, Configuration::for_uid(1000));
        assert!(matches!(result, Err(Error::ConfigMissing(p)) if p == path));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");
        let config = load_or_default(&path, Configuration::for_uid(5)).unwrap();
        assert_eq!(config, Configuration::for_uid(5));
    }

    #[test]
    fn test_load_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ \"editor\": ").unwrap();
        let result = load(&path, Configuration::for_uid(1000));
        assert!(matches!(result, Err(Error::ConfigParse { .. })));

        // load_or_default only forgives a missing file
        let result = load_or_default(&path, Configuration::for_uid(1000));
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_wrong_type_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"devel": "yes"}"#).unwrap();
        let result = load(&path, Configuration::for_uid(1000));
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        // SAFETY: serialized with every other env-mutating test
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, "/srv/yay/config.json");
        }
        let path = config_path().unwrap();
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(path, PathBuf::from("/srv/yay/config.json"));
    }

    #[test]
    #[serial]
    fn test_config_path_under_home() {
        let tmp = TempDir::new().unwrap();
        let old_home = std::env::var_os("HOME");
        // SAFETY: serialized with every other env-mutating test
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
            std::env::set_var("HOME", tmp.path());
        }
        let path = config_path().unwrap();
        unsafe {
            match old_home {
                Some(home) => std::env::set_var("HOME", home),
                None => std::env::remove_var("HOME"),
            }
        }
        assert_eq!(path, tmp.path().join(".config/yay/config.json"));
    }

    // ==================== pacman.conf Tests ====================

    #[test]
    fn test_read_alpm_config_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pacman.conf");
        let result = read_alpm_config(&path);
        assert!(matches!(result, Err(Error::NativeConfigOpen { .. })));
    }

    #[test]
    fn test_read_alpm_config_parses_repos() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pacman.conf");
        fs::write(
            &path,
            "[options]\n\
             RootDir = /\n\
             DBPath = /var/lib/pacman/\n\
             \n\
             [core]\n\
             Server = https://mirror.example.org/core/os/x86_64\n\
             \n\
             [extra]\n\
             Server = https://mirror.example.org/extra/os/x86_64\n",
        )
        .unwrap();

        let conf = read_alpm_config(&path).unwrap();
        let names: Vec<&str> = conf.repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["core", "extra"]);
        assert_eq!(conf.root_dir, "/");
    }
}
