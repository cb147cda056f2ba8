//! I/O redirection handling module for the shell.
//!
//! A command line carries at most one redirection, either of standard output
//! or of standard error. The file it names is opened by [`Sinks::open`] right
//! before the command runs and closed when the sinks are dropped at the end of
//! that dispatch cycle.

use crate::error::ShellError;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Represents the mode of redirection operation.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum RedirectionMode {
    /// Overwrite the target file (> or 1> or 2>)
    Overwrite,
    /// Append to the target file (>> or 1>> or 2>>)
    Append,
}

/// Represents a single redirection to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectFile {
    /// The filename to redirect to, exactly as typed
    pub path: String,
    /// The mode of redirection (overwrite or append)
    pub mode: RedirectionMode,
}

impl RedirectFile {
    pub fn new(path: impl Into<String>, mode: RedirectionMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    /// Opens the target, creating it if needed. Relative paths are resolved
    /// against `cwd`.
    pub fn open(&self, cwd: &Path) -> Result<File, ShellError> {
        let full = cwd.join(&self.path);
        log::trace!("opening redirect target {} ({:?})", full.display(), self.mode);
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(self.mode == RedirectionMode::Overwrite)
            .append(self.mode == RedirectionMode::Append)
            .open(&full)
            .map_err(|source| ShellError::Redirect {
                path: self.path.clone(),
                source,
            })
    }
}

/// Which stream of a command, if any, is sent to a file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Redirect {
    #[default]
    None,
    Stdout(RedirectFile),
    Stderr(RedirectFile),
}

impl Redirect {
    /// The destination file, if there is one.
    pub fn file(&self) -> Option<&RedirectFile> {
        match self {
            Redirect::None => None,
            Redirect::Stdout(file) | Redirect::Stderr(file) => Some(file),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Redirect::None)
    }
}

/// Open redirect files for one dispatch cycle.
///
/// Streams without a redirect fall back to whatever writer the caller passes
/// in, so builtins and external commands share one routing path.
#[derive(Debug, Default)]
pub struct Sinks {
    stdout: Option<File>,
    stderr: Option<File>,
}

impl Sinks {
    /// Opens (and for overwrite mode truncates) the file named by `redirect`.
    pub fn open(redirect: &Redirect, cwd: &Path) -> Result<Self, ShellError> {
        let mut sinks = Sinks::default();
        match redirect {
            Redirect::None => {}
            Redirect::Stdout(file) => sinks.stdout = Some(file.open(cwd)?),
            Redirect::Stderr(file) => sinks.stderr = Some(file.open(cwd)?),
        }
        Ok(sinks)
    }

    /// Where standard output goes for this dispatch.
    ///
    /// # Arguments
    ///
    /// * `fallback` - The shell's own stream, used when stdout is not redirected
    ///
    /// # Returns
    ///
    /// The open redirect file, or `fallback`.
    pub fn stdout<'a>(&'a mut self, fallback: &'a mut dyn Write) -> &'a mut dyn Write {
        match self.stdout.as_mut() {
            Some(file) => file,
            None => fallback,
        }
    }

    /// Same as [`Sinks::stdout`], for standard error.
    pub fn stderr<'a>(&'a mut self, fallback: &'a mut dyn Write) -> &'a mut dyn Write {
        match self.stderr.as_mut() {
            Some(file) => file,
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_no_redirection() {
        let redirect = Redirect::None;
        assert!(redirect.is_none());
        assert!(redirect.file().is_none());
    }

    #[test]
    fn test_overwrite_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("out.txt"), "old contents\n").unwrap();

        let redirect = Redirect::Stdout(RedirectFile::new("out.txt", RedirectionMode::Overwrite));
        let sinks = Sinks::open(&redirect, dir.path()).unwrap();
        drop(sinks);

        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "");
    }

    #[test]
    fn test_append_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("log.txt"), "first\n").unwrap();

        let redirect = Redirect::Stdout(RedirectFile::new("log.txt", RedirectionMode::Append));
        let mut sinks = Sinks::open(&redirect, dir.path()).unwrap();
        let mut fallback: Vec<u8> = Vec::new();
        writeln!(sinks.stdout(&mut fallback), "second").unwrap();
        drop(sinks);

        assert!(fallback.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("log.txt")).unwrap(),
            "first\nsecond\n"
        );
    }

    #[test]
    fn test_stderr_redirection_leaves_stdout_on_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let redirect = Redirect::Stderr(RedirectFile::new("err.txt", RedirectionMode::Overwrite));
        let mut sinks = Sinks::open(&redirect, dir.path()).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        write!(sinks.stdout(&mut out), "to stdout").unwrap();
        write!(sinks.stderr(&mut err), "to file").unwrap();
        drop(sinks);

        assert_eq!(out, b"to stdout");
        assert!(err.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("err.txt")).unwrap(),
            "to file"
        );
    }

    #[test]
    fn test_open_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let redirect = Redirect::Stdout(RedirectFile::new(
            "missing/dir/out.txt",
            RedirectionMode::Overwrite,
        ));
        let err = Sinks::open(&redirect, dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("missing/dir/out.txt: "));
    }
}
