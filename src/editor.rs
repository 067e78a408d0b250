//! Editor resolution for build-file review.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. `editor` from config.json
//! 2. `EDITOR` environment variable
//! 3. `VISUAL` environment variable
//! 4. Interactive prompt, repeated until a name resolves on `PATH`
//!
//! A source that is set but does not resolve prints the lookup error and
//! falls through to the next one.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::Configuration;
use crate::prompt::{BOLD_RED, BOLD_YELLOW, GREEN, GREY, RESET};
use crate::{Error, Result};

/// Where a resolved editor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSource {
    /// `editor` key in config.json
    Config,
    /// `EDITOR` environment variable
    EnvEditor,
    /// `VISUAL` environment variable
    EnvVisual,
    /// Typed at the interactive prompt
    Prompt,
}

impl std::fmt::Display for EditorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorSource::Config => write!(f, "config"),
            EditorSource::EnvEditor => write!(f, "env:EDITOR"),
            EditorSource::EnvVisual => write!(f, "env:VISUAL"),
            EditorSource::Prompt => write!(f, "prompt"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: EditorSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: EditorSource) -> Self {
        Self { value, source }
    }
}

/// Turns an executable name into a full path.
pub trait ExecutableLookup {
    /// Resolve `name`, failing with [`Error::ExecutableNotFound`].
    fn lookup(&self, name: &str) -> Result<PathBuf>;
}

/// Lookup through the process's `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPath;

impl ExecutableLookup for SearchPath {
    fn lookup(&self, name: &str) -> Result<PathBuf> {
        which::which(name).map_err(|source| Error::ExecutableNotFound {
            name: name.to_string(),
            source,
        })
    }
}

/// The non-interactive editor sources, in precedence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorCandidates {
    pub forced: Option<String>,
    pub editor: Option<String>,
    pub visual: Option<String>,
}

impl EditorCandidates {
    /// Collect candidates from `config` and the process environment.
    ///
    /// Empty values count as unset.
    pub fn from_env(config: &Configuration) -> Self {
        Self {
            forced: non_empty(Some(config.editor.clone())),
            editor: non_empty(std::env::var("EDITOR").ok()),
            visual: non_empty(std::env::var("VISUAL").ok()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// States of the resolution chain.
#[derive(Debug)]
enum Step {
    TryForced,
    TryEnvEditor,
    TryEnvVisual,
    PromptLoop,
    Resolved(Resolved<PathBuf>),
}

/// Resolves which executable edits build scripts.
pub struct EditorResolver<L: ExecutableLookup> {
    candidates: EditorCandidates,
    lookup: L,
}

impl EditorResolver<SearchPath> {
    /// Resolver over `config` and the environment, searching `PATH`.
    pub fn from_env(config: &Configuration) -> Self {
        Self::new(EditorCandidates::from_env(config), SearchPath)
    }
}

impl<L: ExecutableLookup> EditorResolver<L> {
    pub fn new(candidates: EditorCandidates, lookup: L) -> Self {
        Self { candidates, lookup }
    }

    /// Walk the chain until an editor resolves.
    ///
    /// Nothing is returned to the caller but the resolved editor. Lookup
    /// and read failures are printed to `output` and the prompt asks again
    /// with no retry limit. Write failures on `output` are ignored.
    pub fn resolve<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Resolved<PathBuf> {
        let mut step = Step::TryForced;
        loop {
            step = match step {
                Step::TryForced => self
                    .attempt(self.candidates.forced.as_deref(), EditorSource::Config, output)
                    .map_or(Step::TryEnvEditor, Step::Resolved),
                Step::TryEnvEditor => self
                    .attempt(self.candidates.editor.as_deref(), EditorSource::EnvEditor, output)
                    .map_or(Step::TryEnvVisual, Step::Resolved),
                Step::TryEnvVisual => self
                    .attempt(self.candidates.visual.as_deref(), EditorSource::EnvVisual, output)
                    .map_or(Step::PromptLoop, Step::Resolved),
                Step::PromptLoop => Step::Resolved(self.prompt_loop(input, output)),
                Step::Resolved(resolved) => {
                    debug!(
                        editor = %resolved.value.display(),
                        source = %resolved.source,
                        "resolved editor"
                    );
                    return resolved;
                }
            };
        }
    }

    fn attempt<W: Write>(
        &self,
        name: Option<&str>,
        source: EditorSource,
        output: &mut W,
    ) -> Option<Resolved<PathBuf>> {
        let name = name?;
        match self.lookup.lookup(name) {
            Ok(path) => Some(Resolved::new(path, source)),
            Err(e) => {
                let _ = writeln!(output, "{}", e);
                None
            }
        }
    }

    fn prompt_loop<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Resolved<PathBuf> {
        let _ = write!(
            output,
            "{BOLD_RED}Warning: {BOLD_YELLOW}$EDITOR{GREY} is not set.{RESET}\n\
             Please add $EDITOR or $VISUAL to your environment variables.\n"
        );

        let mut line = String::new();
        loop {
            let _ = write!(output, "{GREEN}Edit PKGBUILD with:{RESET} ");
            let _ = output.flush();

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    let _ = writeln!(output, "unexpected end of input");
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    let _ = writeln!(output, "{}", e);
                    continue;
                }
            }

            let name = line.trim();
            if name.is_empty() {
                let _ = writeln!(output, "expected an executable name");
                continue;
            }

            match self.lookup.lookup(name) {
                Ok(path) => return Resolved::new(path, EditorSource::Prompt),
                Err(e) => {
                    let _ = writeln!(output, "{}", e);
                }
            }
        }
    }
}

/// Resolve the editor for `config` against the real terminal.
///
/// Blocks on the prompt until a name resolves, including when stdin is
/// closed.
pub fn resolve_editor(config: &Configuration) -> Resolved<PathBuf> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    EditorResolver::from_env(config).resolve(&mut stdin.lock(), &mut stdout.lock())
}

/// Open `files` in `editor` with the terminal attached, waiting for it to exit.
pub fn launch_editor(editor: &Path, files: &[PathBuf]) -> Result<()> {
    let program = editor.display().to_string();
    let status = Command::new(editor)
        .args(files)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| Error::ChildProcess {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::ChildExit { program, status })
    }
}
