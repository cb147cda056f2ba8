//! Start-up configuration read from environment variables.

use std::env;

pub const PROMPT_VAR: &str = "TINYSH_PROMPT";
pub const LOG_VAR: &str = "TINYSH_LOG";

const DEFAULT_PROMPT: &str = "$ ";
const DEFAULT_LOG_LEVEL: &str = "off";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Written before every input line.
    pub prompt: String,
    /// Level name for the shell's own log records.
    pub logger_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            logger_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }

        if let Some(level) = lookup(LOG_VAR) {
            config.logger_level = level;
        }

        config
    }
}
