//! A small interactive command interpreter.
//!
//! Each input line is split into words with POSIX-style quoting (see
//! [`parser::tokenize`]), then either handled by one of the builtins `exit`,
//! `echo`, `pwd`, `cd` and `type`, or resolved on the search path and run as
//! an external program. Standard output or standard error of a line can be
//! redirected to a file with `>`, `1>`, `2>` and their `>>` append forms.

pub mod builtins;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod logging;
pub mod parser;
pub mod redirect;
pub mod repl;
pub mod shell;
pub mod utils;

pub use command::CommandRecord;
pub use context::Context;
pub use error::ShellError;
pub use shell::{Flow, Shell};
