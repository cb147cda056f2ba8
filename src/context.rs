//! Interpreter state that outlives a single command line.

use crate::error::ShellError;
use std::env;
use std::path::{Path, PathBuf};

/// Working directory, home directory and executable search path.
///
/// The shell reads these from the process environment once at start-up and
/// afterwards only `cd` changes anything here. Commands never touch the
/// process-wide working directory, which keeps separate contexts isolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    cwd: PathBuf,
    home: Option<PathBuf>,
    search_path: Vec<PathBuf>,
}

impl Context {
    /// Creates a context from explicit values.
    ///
    /// # Arguments
    ///
    /// * `cwd` - Working directory that relative paths and children start from
    /// * `home` - Target of `~` expansion, `None` when unset
    /// * `search_path` - Directories searched for executables, in order
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use tinysh::context::Context;
    ///
    /// let ctx = Context::new("/srv", None, vec![PathBuf::from("/usr/bin")]);
    /// assert_eq!(ctx.cwd(), Path::new("/srv"));
    /// assert_eq!(ctx.home(), None);
    /// assert_eq!(ctx.search_path(), [PathBuf::from("/usr/bin")]);
    /// ```
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>, search_path: Vec<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
            search_path,
        }
    }

    /// Captures `HOME`, `PATH` and the current directory of this process.
    ///
    /// Returns an error only when the current directory cannot be read.
    pub fn from_env() -> Result<Self, ShellError> {
        let cwd = env::current_dir().map_err(ShellError::CurrentDir)?;
        let home = env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from);
        // Empty entries are kept: they stand for the working directory.
        let search_path = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        log::debug!(
            "context: cwd={} home={:?} search_path={:?}",
            cwd.display(),
            home,
            search_path
        );
        Ok(Self::new(cwd, home, search_path))
    }

    /// The interpreter's working directory. `pwd` prints this.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Replaces the working directory. The caller checks that `dir` exists;
    /// the process working directory is left alone.
    pub fn set_cwd(&mut self, dir: PathBuf) {
        log::debug!("cwd: {} -> {}", self.cwd.display(), dir.display());
        self.cwd = dir;
    }

    /// Home directory used for `~`, if known.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Executable search directories as configured. Entries may be relative
    /// or empty; see [`crate::exec::find_exec_in_path`] for how they resolve.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Resolves `path` against the working directory. Absolute paths are
    /// returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(path)
    }
}
