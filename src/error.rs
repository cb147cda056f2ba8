//! Error types for the shell.
//!
//! Every variant's `Display` output is the diagnostic the user sees, so the
//! dispatcher can print errors without any extra formatting.

use std::io::{self, ErrorKind};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// A builtin that takes exactly one argument got some other count.
    #[error("{0}: wrong number of arguments")]
    WrongArgCount(&'static str),

    #[error("exit: {arg}: {source}")]
    InvalidExitCode {
        arg: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{0} is not a directory")]
    NotADirectory(String),

    #[error("cd: {0}: No such file or directory")]
    NoSuchDirectory(String),

    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("error getting current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{name}: {}", spawn_reason(.source))]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("write error: {0}")]
    Output(#[from] io::Error),
}

impl ShellError {
    /// Status the interpreter must terminate with after reporting this error,
    /// if any.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            ShellError::InvalidExitCode { .. } => Some(1),
            _ => None,
        }
    }
}

fn spawn_reason(err: &io::Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => "command not found".to_string(),
        ErrorKind::PermissionDenied => "Permission denied".to_string(),
        _ => format!("failed to execute: {}", err),
    }
}
