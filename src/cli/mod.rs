//! CLI argument definitions for yay.

use clap::{Parser, Subcommand};

use crate::prompt::STOP_ON_NO;

/// Version string with build metadata for `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("YAY_GIT_COMMIT"),
    " built ",
    env!("YAY_BUILD_TIMESTAMP"),
    ")"
);

/// yay - an AUR helper front-end for pacman.
#[derive(Parser, Debug)]
#[command(name = "yay")]
#[command(author, version, long_version = LONG_VERSION, about = "An AUR helper front-end for pacman", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Answer every confirmation prompt with the default for this run only
    #[arg(long = "noconfirm", global = true)]
    pub no_confirm: bool,

    /// Use <path> instead of ~/.config/yay/config.json.
    /// Can also be set via YAY_CONFIG environment variable.
    #[arg(long = "config", global = true, env = "YAY_CONFIG")]
    pub config_path: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show which editor would be used to review build files
    Editor,

    /// Open files in the resolved editor
    Edit {
        /// Files to edit (e.g. PKGBUILD)
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
    },

    /// Ask a yes/no question; exits 0 to continue, 1 to stop
    Confirm {
        /// Question to display
        message: String,

        /// The two letters that stop the task ("nN" shows [Y/n], "yY" shows [y/N])
        #[arg(long = "default", default_value = STOP_ON_NO)]
        default_spec: String,
    },

    /// Pass an operation straight to pacman (e.g. `yay pass -S foo -- --needed`)
    Pass {
        /// Operation token (e.g. -S, -Qi, -R)
        #[arg(allow_hyphen_values = true)]
        operation: String,

        /// Package names
        packages: Vec<String>,

        /// Extra pacman flags, given after `--`
        #[arg(last = true)]
        flags: Vec<String>,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write the effective configuration to the config file
    Save,

    /// Set a configuration value and save
    Set {
        /// Configuration key (JSON name, e.g. editor, sortmode, pacmanbin)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Parse pacman.conf and summarize it
    Pacman,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // This will panic if the CLI is misconfigured
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pass_accepts_hyphenated_operation() {
        let cli = Cli::try_parse_from(["yay", "pass", "-Qi", "foo", "bar", "--", "--color", "never"])
            .unwrap();
        match cli.command {
            Commands::Pass {
                operation,
                packages,
                flags,
            } => {
                assert_eq!(operation, "-Qi");
                assert_eq!(packages, vec!["foo", "bar"]);
                assert_eq!(flags, vec!["--color", "never"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_confirm_default_spec() {
        let cli = Cli::try_parse_from(["yay", "confirm", "Proceed?"]).unwrap();
        match cli.command {
            Commands::Confirm { default_spec, .. } => assert_eq!(default_spec, "nN"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_noconfirm() {
        let cli = Cli::try_parse_from(["yay", "config", "show", "--noconfirm"]).unwrap();
        assert!(cli.no_confirm);
    }
}
