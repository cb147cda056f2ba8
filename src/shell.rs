//! Command dispatch.
//!
//! [`Shell`] owns the interpreter [`Context`] together with the writers that
//! stand in for standard output and standard error. Each input line goes
//! through [`Shell::execute_line`]: it is tokenized, routed to a builtin or an
//! external program, and every byte it produces is written before the call
//! returns.

use crate::builtins::{Builtin, Reply};
use crate::command::CommandRecord;
use crate::context::Context;
use crate::error::ShellError;
use crate::exec::{execute_external_command, find_exec_in_path};
use crate::parser::tokenize;
use crate::redirect::Sinks;
use log::{debug, warn};
use std::io::{self, Write};

/// What the read loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// An interpreter session: the [`Context`] plus the streams that output and
/// diagnostics are written to.
pub struct Shell<O: Write, E: Write> {
    ctx: Context,
    out: O,
    err: E,
}

impl Shell<io::Stdout, io::Stderr> {
    /// A shell writing to this process's standard output and error.
    pub fn stdio(ctx: Context) -> Self {
        Self::new(ctx, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Shell<O, E> {
    /// Creates a shell over arbitrary writers.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Initial working directory, home and search path
    /// * `out` - Receives command output and the prompt
    /// * `err` - Receives diagnostics and relayed child stderr
    pub fn new(ctx: Context, out: O, err: E) -> Self {
        Self { ctx, out, err }
    }

    /// Current interpreter state, as left by the last `cd`.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The output writer. Tests read captured bytes through this.
    pub fn out(&self) -> &O {
        &self.out
    }

    pub fn err(&self) -> &E {
        &self.err
    }

    /// Writes the prompt and flushes so it shows up before input is read.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.out.write_all(prompt.as_bytes())?;
        self.out.flush()
    }

    /// Flushes both streams.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    /// Tokenizes and dispatches one raw input line.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinysh::context::Context;
    /// use tinysh::shell::{Flow, Shell};
    ///
    /// let mut shell = Shell::new(Context::new("/", None, Vec::new()), Vec::<u8>::new(), Vec::<u8>::new());
    /// assert_eq!(shell.execute_line("echo hi"), Flow::Continue);
    /// assert_eq!(shell.out(), b"hi\n");
    /// assert_eq!(shell.execute_line("exit 4"), Flow::Exit(4));
    /// ```
    pub fn execute_line(&mut self, line: &str) -> Flow {
        let cmd = tokenize(line);
        self.dispatch(&cmd)
    }

    /// Routes a record to the builtin dispatcher or the external executor.
    /// Blank records are ignored.
    pub fn dispatch(&mut self, cmd: &CommandRecord) -> Flow {
        if cmd.is_blank() {
            return Flow::Continue;
        }
        debug!(
            "dispatch: verb={:?} args={:?} redirect={:?}",
            cmd.verb(),
            cmd.arguments(),
            cmd.redirect()
        );

        match Builtin::from_name(cmd.verb()) {
            Some(builtin) => self.run_builtin(builtin, cmd),
            None => self.run_external(cmd),
        }
    }

    fn run_builtin(&mut self, builtin: Builtin, cmd: &CommandRecord) -> Flow {
        let mut sinks = match Sinks::open(cmd.redirect(), self.ctx.cwd()) {
            Ok(sinks) => sinks,
            Err(e) => {
                self.report(&e);
                return Flow::Continue;
            }
        };

        let result = builtin.run(cmd.arguments(), &mut self.ctx, sinks.stderr(&mut self.err));
        match result {
            Ok(Reply::Output(text)) => {
                if let Err(e) = sinks.stdout(&mut self.out).write_all(text.as_bytes()) {
                    self.report(&ShellError::Output(e));
                }
            }
            Ok(Reply::Silent) => {}
            Ok(Reply::Exit(code)) => {
                debug!("exit requested with status {}", code);
                return Flow::Exit(code);
            }
            Err(e) => {
                write_diagnostic(sinks.stderr(&mut self.err), &e);
                if let Some(code) = e.exit_status() {
                    return Flow::Exit(code);
                }
            }
        }
        Flow::Continue
    }

    fn run_external(&mut self, cmd: &CommandRecord) -> Flow {
        let Some(path) = find_exec_in_path(cmd.verb(), &self.ctx) else {
            self.report(&ShellError::CommandNotFound(cmd.verb().to_string()));
            return Flow::Continue;
        };

        let mut sinks = match Sinks::open(cmd.redirect(), self.ctx.cwd()) {
            Ok(sinks) => sinks,
            Err(e) => {
                self.report(&e);
                return Flow::Continue;
            }
        };

        match execute_external_command(cmd.verb(), &path, cmd.arguments(), self.ctx.cwd()) {
            Ok(captured) => {
                if !captured.status.success() {
                    debug!("{} failed: {}", cmd.verb(), captured.status);
                }
                if let Err(e) = sinks.stdout(&mut self.out).write_all(&captured.stdout) {
                    self.report(&ShellError::Output(e));
                }
                if let Err(e) = sinks.stderr(&mut self.err).write_all(&captured.stderr) {
                    warn!("could not relay stderr of {}: {}", cmd.verb(), e);
                }
            }
            Err(e) => write_diagnostic(sinks.stderr(&mut self.err), &e),
        }
        Flow::Continue
    }

    /// Reports an error on the shell's own error stream.
    fn report(&mut self, err: &ShellError) {
        write_diagnostic(&mut self.err, err);
    }
}

fn write_diagnostic(sink: &mut dyn Write, err: &ShellError) {
    debug!("diagnostic: {:?}", err);
    if let Err(e) = writeln!(sink, "{}", err) {
        warn!("could not write diagnostic {:?}: {}", err.to_string(), e);
    }
}
