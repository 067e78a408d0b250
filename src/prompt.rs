//! Yes/no confirmation gate and the console colours shared by prompts.
//!
//! [`Prompter::confirm`] answers "should the task continue?". The default
//! spec is two letters: the ones that *stop* the task. `"nN"` renders as
//! `[Y/n]`; anything else renders as `[y/N]`. An empty answer, or one that
//! cannot be read, continues. An answer equal to either letter, ignoring
//! case, stops. Anything else continues.
//!
//! This means `confirm(msg, "yY")` answered with `y` returns `false`.
//! Callers phrase such questions so that "yes" means "do not continue"
//! without this module inverting anything.

use std::io::{BufRead, Write};

use crate::config::Configuration;

pub const RESET: &str = "\x1b[0m";
pub const GREEN: &str = "\x1b[32m";
pub const BOLD_GREEN: &str = "\x1b[1;32m";
pub const BOLD_WHITE: &str = "\x1b[1;37m";
pub const BOLD_RED: &str = "\x1b[1;31;40m";
pub const BOLD_YELLOW: &str = "\x1b[1;33;40m";
pub const GREY: &str = "\x1b[0;37;40m";

/// Default spec whose letters are `n`/`N`, shown as `[Y/n]`.
pub const STOP_ON_NO: &str = "nN";

/// Default spec whose letters are `y`/`Y`, shown as `[y/N]`.
pub const STOP_ON_YES: &str = "yY";

/// Bracketed hint shown after the message for `default_spec`.
pub fn suffix(default_spec: &str) -> &'static str {
    if default_spec == STOP_ON_NO {
        "[Y/n] "
    } else {
        "[y/N] "
    }
}

/// Confirmation prompts over an arbitrary input/output pair.
pub struct Prompter<R, W> {
    no_confirm: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(no_confirm: bool, input: R, output: W) -> Self {
        Self {
            no_confirm,
            input,
            output,
        }
    }

    /// Ask `message` and return whether the task should continue.
    ///
    /// With `no_confirm` set nothing is written or read and the answer is
    /// `true`.
    pub fn confirm(&mut self, message: &str, default_spec: &str) -> bool {
        if self.no_confirm {
            return true;
        }

        let written = write!(
            self.output,
            "{BOLD_GREEN}==> {message}{BOLD_WHITE} {}{RESET}",
            suffix(default_spec)
        )
        .and_then(|_| self.output.flush());
        if written.is_err() {
            return true;
        }

        let mut response = String::new();
        match self.input.read_line(&mut response) {
            Ok(0) | Err(_) => return true,
            Ok(_) => {}
        }

        let response = response.trim();
        if response.is_empty() {
            return true;
        }

        !default_spec
            .chars()
            .take(2)
            .any(|letter| response.eq_ignore_ascii_case(letter.encode_utf8(&mut [0; 4])))
    }

    /// Consume the prompter, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Ask on the real terminal, honouring `config.no_confirm`.
pub fn confirm(config: &Configuration, message: &str, default_spec: &str) -> bool {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Prompter::new(config.no_confirm, stdin.lock(), stdout.lock()).confirm(message, default_spec)
}
