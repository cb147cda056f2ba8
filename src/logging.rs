use crate::config::Config;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;
use std::process;

/// Maps a level name to a filter. Unknown names turn logging off so the
/// interactive output stays clean.
pub fn parse_level(level: &str) -> LevelFilter {
    match level {
        level if level.eq_ignore_ascii_case("error") => LevelFilter::Error,
        level if level.eq_ignore_ascii_case("warn") => LevelFilter::Warn,
        level if level.eq_ignore_ascii_case("info") => LevelFilter::Info,
        level if level.eq_ignore_ascii_case("debug") => LevelFilter::Debug,
        level if level.eq_ignore_ascii_case("trace") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

/// Installs the global logger. Records go to standard error.
pub fn init_logger(config: &Config) {
    let level = parse_level(&config.logger_level);

    let result = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[PID:{}][{}] {} - {}",
                process::id(),
                record.level(),
                buf.timestamp_seconds(),
                record.args()
            )
        })
        .target(Target::Stderr)
        .filter(Some(env!("CARGO_CRATE_NAME")), level)
        .filter(None, LevelFilter::Warn)
        .try_init();

    match result {
        Ok(()) => log::debug!("log level set to {}", level),
        Err(e) => eprintln!("tinysh: logger already initialised: {}", e),
    }
}
