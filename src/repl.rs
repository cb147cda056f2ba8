//! The read-eval-print loop.

use crate::config::Config;
use crate::shell::{Flow, Shell};
use anyhow::{Context as _, Result};
use log::debug;
use std::io::{BufRead, Write};

/// Reads lines from `input` and executes them until `exit` runs or input ends.
///
/// Returns the status the process should exit with: the `exit` argument, or 0
/// at end of input. An error reading input is returned to the caller.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use tinysh::config::Config;
/// use tinysh::context::Context;
/// use tinysh::repl;
/// use tinysh::shell::Shell;
///
/// let mut shell = Shell::new(Context::new("/", None, Vec::new()), Vec::<u8>::new(), Vec::<u8>::new());
/// let status = repl::run(&Config::default(), Cursor::new("echo hi\nexit 5\n"), &mut shell).unwrap();
/// assert_eq!(status, 5);
/// assert_eq!(shell.out(), b"$ hi\n$ ");
/// ```
pub fn run<R, O, E>(config: &Config, mut input: R, shell: &mut Shell<O, E>) -> Result<i32>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut buf = Vec::new();
    loop {
        shell
            .prompt(&config.prompt)
            .context("failed to write prompt")?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("error reading input")?;
        if read == 0 {
            debug!("end of input");
            // Leave the terminal on a fresh line.
            shell.prompt("\n").context("failed to write output")?;
            shell.flush().context("failed to flush output")?;
            return Ok(0);
        }

        // Bytes that are not UTF-8 become U+FFFD instead of ending the session.
        let line = String::from_utf8_lossy(&buf);
        if let Flow::Exit(code) = shell.execute_line(&line) {
            shell.flush().context("failed to flush output")?;
            return Ok(code);
        }
    }
}
