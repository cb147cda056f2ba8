//! The parsed form of one input line.

use crate::redirect::Redirect;

/// One tokenized input line, ready for dispatch.
///
/// Built once by the tokenizer and only read afterwards. A blank line is
/// represented by an empty verb with no arguments and no redirection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandRecord {
    verb: String,
    arguments: Vec<String>,
    redirect: Redirect,
}

impl CommandRecord {
    /// The record produced for an empty or whitespace-only line.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Builds a record from the words of a line. The first word becomes the
    /// verb; with no words at all the result is [`CommandRecord::blank`] and
    /// `redirect` is dropped.
    pub fn from_words(words: Vec<String>, redirect: Redirect) -> Self {
        let mut words = words.into_iter();
        match words.next() {
            Some(verb) => Self {
                verb,
                arguments: words.collect(),
                redirect,
            },
            None => Self::blank(),
        }
    }

    /// The command name: the first word of the line, or `""` for a blank line.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Every word after the verb, in order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The output redirection for this line.
    ///
    /// # Returns
    ///
    /// * `Redirect::None` - Output goes to the shell's own streams
    /// * `Redirect::Stdout(file)` / `Redirect::Stderr(file)` - That stream goes to `file`
    pub fn redirect(&self) -> &Redirect {
        &self.redirect
    }

    /// Destination file of the redirection, if any.
    pub fn target_path(&self) -> Option<&str> {
        self.redirect.file().map(|file| file.path.as_str())
    }

    /// True for an empty or whitespace-only line, which dispatch skips.
    pub fn is_blank(&self) -> bool {
        self.verb.is_empty()
    }
}
