//! Command line parsing module for the shell.
//!
//! This module turns one raw input line into a [`CommandRecord`], respecting
//! shell quoting rules, escape sequences and a trailing output redirection.

use crate::command::CommandRecord;
use crate::redirect::{Redirect, RedirectFile, RedirectionMode};

// --- Constants ---
pub const BACKSLASH: char = '\\';
pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';
pub const REDIRECT: char = '>';

/// Characters a backslash escapes inside double quotes. Any other character
/// keeps its backslash.
const DOUBLE_QUOTE_ESCAPES: [char; 3] = [BACKSLASH, '$', DOUBLE_QUOTE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    Unquoted,
    Single,
    Double,
}

/// Which stream a redirection operator targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Tokenizes a command line into a [`CommandRecord`].
///
/// The scan never fails. An unterminated quote swallows the rest of the line
/// into the current word, and a backslash with nothing after it is dropped.
/// Once an unquoted `>`, `1>`, `2>` (or the `>>` append forms) is seen, the
/// trimmed remainder of the line is taken literally as the target path.
///
/// # Examples
///
/// ```
/// use tinysh::parser::tokenize;
///
/// let cmd = tokenize("echo 'hello   world' > out.txt");
/// assert_eq!(cmd.verb(), "echo");
/// assert_eq!(cmd.arguments(), ["hello   world"]);
/// assert_eq!(cmd.target_path(), Some("out.txt"));
/// ```
pub fn tokenize(line: &str) -> CommandRecord {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    // Set while `current` holds only unquoted, unescaped characters, so a bare
    // `2>` can be told apart from `'2'>`.
    let mut bare = true;
    let mut quoting = Quoting::Unquoted;
    let mut redirect = Redirect::None;
    let mut chars = line.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match quoting {
            Quoting::Single => match c {
                SINGLE_QUOTE => quoting = Quoting::Unquoted,
                _ => current.push(c),
            },
            Quoting::Double => match c {
                DOUBLE_QUOTE => quoting = Quoting::Unquoted,
                BACKSLASH => match chars.next() {
                    Some(next) if DOUBLE_QUOTE_ESCAPES.contains(&next) => current.push(next),
                    Some(next) => {
                        current.push(BACKSLASH);
                        current.push(next);
                    }
                    None => {}
                },
                _ => current.push(c),
            },
            Quoting::Unquoted => match c {
                SINGLE_QUOTE => {
                    quoting = Quoting::Single;
                    bare = false;
                }
                DOUBLE_QUOTE => {
                    quoting = Quoting::Double;
                    bare = false;
                }
                BACKSLASH => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    bare = false;
                }
                REDIRECT => {
                    let stream = if bare && current == "2" {
                        Stream::Stderr
                    } else if bare && current == "1" {
                        Stream::Stdout
                    } else {
                        flush_word(&mut words, &mut current);
                        Stream::Stdout
                    };
                    current.clear();

                    let mode = if chars.next_if_eq(&REDIRECT).is_some() {
                        RedirectionMode::Append
                    } else {
                        RedirectionMode::Overwrite
                    };
                    let rest: String = chars.by_ref().collect();
                    redirect = redirect_to(stream, rest.trim(), mode);
                    break;
                }
                c if c.is_whitespace() => {
                    flush_word(&mut words, &mut current);
                    bare = true;
                }
                _ => current.push(c),
            },
        }
    }

    flush_word(&mut words, &mut current);
    CommandRecord::from_words(words, redirect)
}

fn flush_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn redirect_to(stream: Stream, path: &str, mode: RedirectionMode) -> Redirect {
    if path.is_empty() {
        log::debug!("redirection without a target path ignored");
        return Redirect::None;
    }
    let file = RedirectFile::new(path, mode);
    match stream {
        Stream::Stdout => Redirect::Stdout(file),
        Stream::Stderr => Redirect::Stderr(file),
    }
}
