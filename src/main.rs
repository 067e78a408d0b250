//! yay CLI - an AUR helper front-end for pacman.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{debug, warn};

use yay::cli::{Cli, Commands, ConfigCommands};
use yay::commands::{self, Output};
use yay::config::{self, Configuration};
use yay::{Error, pacman, prompt, sys};

fn main() {
    yay::logging::init_logging();

    let cli = Cli::parse();
    let human = cli.human_readable;

    // Without an identity there is no safe build directory
    let defaults = match Configuration::default_settings() {
        Ok(defaults) => defaults,
        Err(e) => exit_with(&e, human),
    };

    if sys::is_root() {
        warn!("running as root; package builds should not run as root");
    }

    let config_path = resolve_config_path(cli.config_path);
    let mut config = load_config(config_path.as_deref(), defaults, human);
    if cli.no_confirm {
        config.no_confirm = true;
    }

    if let Err(e) = run_command(cli.command, &mut config, config_path.as_deref(), human) {
        exit_with(&e, human);
    }
}

/// --config flag / YAY_CONFIG > $HOME/.config/yay/config.json
fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path),
        None => match config::config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("no config location: {}", e);
                None
            }
        },
    }
}

/// Overlay the config file onto `defaults`.
///
/// A missing file leaves the defaults in place silently; any other problem
/// is reported and the defaults are used anyway.
fn load_config(path: Option<&Path>, defaults: Configuration, human: bool) -> Configuration {
    let Some(path) = path else {
        return defaults;
    };
    match config::load_or_default(path, defaults.clone()) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}", e);
            if human {
                eprintln!("Warning: {} (using defaults)", e);
            } else {
                eprintln!(
                    "{}",
                    serde_json::json!({ "warning": e.to_string(), "hint": "using defaults" })
                );
            }
            defaults
        }
    }
}

fn run_command(
    command: Commands,
    config: &mut Configuration,
    config_path: Option<&Path>,
    human: bool,
) -> Result<(), Error> {
    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                output(&commands::config_show(config, config_path), human);
            }
            ConfigCommands::Path => {
                let path = config_path.ok_or(Error::HomeUnavailable)?;
                output(&commands::config_path(path), human);
            }
            ConfigCommands::Save => {
                let path = config_path.ok_or(Error::HomeUnavailable)?;
                output(&commands::config_save(config, path)?, human);
            }
            ConfigCommands::Set { key, value } => {
                let path = config_path.ok_or(Error::HomeUnavailable)?;
                output(&commands::config_set(config, path, &key, &value)?, human);
            }
            ConfigCommands::Pacman => {
                output(&commands::pacman_conf(config)?, human);
            }
        },
        Commands::Editor => {
            output(&commands::editor_show(config), human);
        }
        Commands::Edit { files } => {
            commands::edit(config, &files)?;
        }
        Commands::Confirm {
            message,
            default_spec,
        } => {
            if !prompt::confirm(config, &message, &default_spec) {
                process::exit(1);
            }
        }
        Commands::Pass {
            operation,
            packages,
            flags,
        } => {
            pacman::run_package_manager(config, &operation, &packages, &flags)?;
        }
    }
    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Report `e` and exit, reusing a child's exit code when there is one.
fn exit_with(e: &Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    }
    let code = match e {
        Error::ChildExit { status, .. } => status.code().unwrap_or(1),
        _ => 1,
    };
    process::exit(code);
}
