//! External editor process.

use crate::core::error::EditError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub const EDITOR_ENV: &str = "EDITOR";

/// Probed in order when neither a configured editor nor `$EDITOR` is set.
pub const FALLBACK_EDITORS: &[&str] = &["nano", "pico", "vim", "vi", "emacs"];

/// Something that lets the operator change a file in place.
///
/// Returning `Ok(())` accepts the edit; any error aborts the session.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<(), EditError>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<(), EditError>,
{
    fn edit(&self, path: &Path) -> Result<(), EditError> {
        self(path)
    }
}

/// An editor command line, e.g. `vim` or `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

impl ExternalEditor {
    /// Pick the editor: `configured`, then `$EDITOR`, then the first
    /// [`FALLBACK_EDITORS`] entry found on `PATH`.
    pub fn resolve(configured: Option<&str>) -> Result<Self, EditError> {
        let from_env = std::env::var(EDITOR_ENV).ok();
        let command = configured
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .or_else(|| from_env.filter(|c| !c.trim().is_empty()))
            .or_else(|| {
                first_available(FALLBACK_EDITORS, |name| which::which(name).is_ok())
                    .map(str::to_string)
            })
            .ok_or_else(|| EditError::NoEditorFound(FALLBACK_EDITORS.join(", ")))?;
        Self::from_command(&command)
    }

    /// Split a command line on whitespace into program and leading arguments.
    pub fn from_command(command: &str) -> Result<Self, EditError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| EditError::NoEditorFound(FALLBACK_EDITORS.join(", ")))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, path: &Path) -> Result<(), EditError> {
        debug!(
            program = %self.program,
            args = ?self.args,
            path = %path.display(),
            "launching editor"
        );
        // stdin, stdout and stderr are inherited so the editor owns the terminal.
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| {
                EditError::EditorAborted(format!("failed to start {}: {}", self.program, e))
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(EditError::EditorAborted(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}

fn first_available<'a>(
    candidates: &[&'a str],
    available: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    candidates.iter().copied().find(|name| available(name))
}
