//! External command execution module for the shell.
//!
//! This module handles finding executables in the search path and running
//! external commands with their output captured for the caller to route.

use crate::context::Context;
use crate::error::ShellError;
use bytes::Bytes;
use std::fs::{self, Metadata};
use std::io::{self, ErrorKind};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt; // For execute bits
#[cfg(unix)]
use std::os::unix::process::CommandExt; // For arg0
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Output of a finished external command.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: Bytes,
    pub stderr: Bytes,
}

fn is_executable(metadata: &Metadata) -> bool {
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        // Check execute permission (user, group, or other)
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        // Assume file is executable on non-Unix
        true
    }
}

/// Looks for an executable file called `name` in a single directory.
///
/// A directory that does not exist counts as "not found"; other IO errors are
/// returned.
///
/// # Returns
///
/// * `Ok(Some(path))` - Found executable at the given path
/// * `Ok(None)` - Executable not found in this directory
/// * `Err(e)` - IO error occurred while searching
pub fn find_exec_in_dir(dir: &Path, name: &str) -> io::Result<Option<PathBuf>> {
    let candidate = dir.join(name);
    match fs::metadata(&candidate) {
        Ok(metadata) if is_executable(&metadata) => Ok(Some(candidate)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None), // Skip non-existent dirs in PATH
        Err(e) => Err(e),
    }
}

/// Finds an executable: checks the path directly if `name` contains '/',
/// otherwise walks the context's search path in order.
///
/// Search path entries that are not absolute, including the empty entry, are
/// taken relative to the context's working directory.
///
/// # Examples
///
/// ```
/// use tinysh::context::Context;
/// use tinysh::exec::find_exec_in_path;
///
/// let ctx = Context::new("/", None, Vec::new());
/// assert_eq!(find_exec_in_path("ls", &ctx), None);
/// ```
pub fn find_exec_in_path(name: &str, ctx: &Context) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains('/') {
        let path = ctx.resolve(name);
        return match fs::metadata(&path) {
            Ok(metadata) if is_executable(&metadata) => Some(path),
            _ => None,
        };
    }

    // Relative and empty entries name directories under the shell's cwd.
    for dir in ctx.search_path().iter().map(|dir| ctx.resolve(dir)) {
        match find_exec_in_dir(&dir, name) {
            Ok(Some(full_path)) => {
                log::trace!("resolved {} to {}", name, full_path.display());
                return Some(full_path);
            }
            Ok(None) => {}
            // Continue searching other directories on error
            Err(e) => log::warn!("skipping {} while resolving {}: {}", dir.display(), name, e),
        }
    }
    None
}

/// Runs an external command to completion and captures its output.
///
/// `command_name` becomes argv[0] on Unix; `command_path` is what actually
/// gets executed. The child runs in `cwd` with standard input closed.
///
/// # Returns
///
/// * `Ok(captured)` - The command ran; check `captured.status` for success
/// * `Err(ShellError::Spawn)` - The process could not be started
pub fn execute_external_command(
    command_name: &str,
    command_path: &Path,
    args: &[String],
    cwd: &Path,
) -> Result<Captured, ShellError> {
    let mut command = Command::new(command_path);
    #[cfg(unix)]
    {
        command.arg0(command_name);
    } // Set argv[0] on Unix
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    log::debug!("spawning {} {:?}", command_path.display(), args);
    let output = command.output().map_err(|source| ShellError::Spawn {
        name: command_name.to_string(),
        source,
    })?;
    log::debug!("{} exited with {}", command_name, output.status);

    Ok(Captured {
        status: output.status,
        stdout: Bytes::from(output.stdout),
        stderr: Bytes::from(output.stderr),
    })
}
