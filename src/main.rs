use std::io;
use std::path::PathBuf;
use std::process;

use tinysh::config::Config;
use tinysh::logging::init_logger;
use tinysh::{repl, Context, Shell};

fn main() {
    let config = Config::new();
    init_logger(&config);

    let ctx = match Context::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e);
            let fallback = Context::new(PathBuf::from("/"), None, Vec::new());
            log::warn!("starting in {}", fallback.cwd().display());
            fallback
        }
    };

    let mut shell = Shell::stdio(ctx);
    let stdin = io::stdin();
    match repl::run(&config, stdin.lock(), &mut shell) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}
