//! Built-in shell commands module for the shell.
//!
//! This module implements all the built-in commands that are handled directly
//! by the shell rather than being executed as external programs. Handlers
//! return what the command prints; routing that text to the terminal or to a
//! redirect file is left to the dispatcher.

use crate::context::Context;
use crate::error::ShellError;
use crate::exec::find_exec_in_path;
use crate::utils::expand_tilde;
use std::fs;
use std::io::Write;

/// Names of every builtin verb.
pub const BUILTIN_NAMES: [&str; 5] = ["exit", "echo", "pwd", "cd", "type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Echo,
    Pwd,
    Cd,
    Type,
}

/// What a builtin asks the dispatcher to do once it has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text for standard output.
    Output(String),
    /// Nothing to print.
    Silent,
    /// Terminate the interpreter with this status.
    Exit(i32),
}

impl Builtin {
    /// Looks up a builtin by its verb.
    ///
    /// # Returns
    ///
    /// * `Some(builtin)` - `name` is one of [`BUILTIN_NAMES`]
    /// * `None` - `name` should be resolved as an external program
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "exit" => Some(Builtin::Exit),
            "echo" => Some(Builtin::Echo),
            "pwd" => Some(Builtin::Pwd),
            "cd" => Some(Builtin::Cd),
            "type" => Some(Builtin::Type),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
            Builtin::Type => "type",
        }
    }

    /// Runs the builtin against `ctx`.
    ///
    /// `diag` receives warnings that do not stop the command, such as a
    /// failed `~` expansion.
    pub fn run(
        self,
        args: &[String],
        ctx: &mut Context,
        diag: &mut dyn Write,
    ) -> Result<Reply, ShellError> {
        match self {
            Builtin::Exit => handle_exit(args),
            Builtin::Echo => Ok(handle_echo(args)),
            Builtin::Pwd => Ok(handle_pwd(ctx)),
            Builtin::Cd => handle_cd(args, ctx, diag),
            Builtin::Type => handle_type(args, ctx),
        }
    }
}

/// Handles the `echo` command by joining all arguments with spaces.
///
/// # Examples
///
/// ```
/// use tinysh::builtins::{handle_echo, Reply};
///
/// let result = handle_echo(&["hello".to_string(), "world".to_string()]);
/// assert_eq!(result, Reply::Output("hello world\n".to_string()));
/// ```
pub fn handle_echo(args: &[String]) -> Reply {
    Reply::Output(format!("{}\n", args.join(" ")))
}

/// Handles the `pwd` command by returning the context's working directory.
pub fn handle_pwd(ctx: &Context) -> Reply {
    Reply::Output(format!("{}\n", ctx.cwd().display()))
}

/// Handles the `exit` command. Exactly one integer argument is required.
///
/// A non-integer argument is an error whose
/// [`exit_status`](ShellError::exit_status) is 1.
pub fn handle_exit(args: &[String]) -> Result<Reply, ShellError> {
    match args {
        [code] => code
            .parse::<i32>()
            .map(Reply::Exit)
            .map_err(|source| ShellError::InvalidExitCode {
                arg: code.clone(),
                source,
            }),
        _ => Err(ShellError::WrongArgCount("exit")),
    }
}

/// Generates the line printed by `type` for `name`.
/// Checks if a command is a built-in or searches for it in the search path.
fn type_info_string(name: &str, ctx: &Context) -> String {
    if Builtin::from_name(name).is_some() {
        format!("{} is a shell builtin", name)
    } else if let Some(full_path) = find_exec_in_path(name, ctx) {
        format!("{} is {}", name, full_path.display())
    } else {
        format!("{}: not found", name)
    }
}

/// Handles the `type` command by showing information about a command.
pub fn handle_type(args: &[String], ctx: &Context) -> Result<Reply, ShellError> {
    match args {
        [name] => Ok(Reply::Output(format!("{}\n", type_info_string(name, ctx)))),
        _ => Err(ShellError::WrongArgCount("type")),
    }
}

/// Changes the context's working directory to `target`, expanding a leading
/// `~`. When expansion fails the warning goes to `diag` and `target` is used
/// as typed.
fn change_dir(target: &str, ctx: &mut Context, diag: &mut dyn Write) -> Result<(), ShellError> {
    let expanded = match expand_tilde(target, ctx.home()) {
        Ok(path) => path,
        Err(e) => {
            writeln!(diag, "{}", e)?;
            target.to_string()
        }
    };

    let resolved = ctx.resolve(&expanded);
    match fs::metadata(&resolved) {
        Ok(metadata) if metadata.is_dir() => {
            let dir = fs::canonicalize(&resolved).unwrap_or(resolved);
            ctx.set_cwd(dir);
            Ok(())
        }
        Ok(_) => Err(ShellError::NotADirectory(expanded)),
        Err(_) => Err(ShellError::NoSuchDirectory(expanded)),
    }
}

/// Handles the `cd` command. Exactly one argument, the target directory, is
/// required.
pub fn handle_cd(
    args: &[String],
    ctx: &mut Context,
    diag: &mut dyn Write,
) -> Result<Reply, ShellError> {
    match args {
        [path] => change_dir(path, ctx, diag).map(|_| Reply::Silent),
        _ => Err(ShellError::WrongArgCount("cd")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn context_in(dir: &Path) -> Context {
        Context::new(fs::canonicalize(dir).unwrap(), None, Vec::new())
    }

    #[test]
    fn test_every_name_round_trips() {
        for name in BUILTIN_NAMES {
            assert_eq!(Builtin::from_name(name).map(Builtin::name), Some(name));
        }
        assert_eq!(Builtin::from_name("ls"), None);
        assert_eq!(Builtin::from_name(""), None);
    }

    #[test]
    fn test_echo_empty() {
        assert_eq!(handle_echo(&[]), Reply::Output("\n".to_string()));
    }

    #[test]
    fn test_echo_multiple_args() {
        let result = handle_echo(&strings(&["hello", "  spaced  ", "world"]));
        assert_eq!(result, Reply::Output("hello   spaced   world\n".to_string()));
    }

    #[test]
    fn test_pwd() {
        let ctx = Context::new("/some/where", None, Vec::new());
        assert_eq!(handle_pwd(&ctx), Reply::Output("/some/where\n".to_string()));
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(handle_exit(&strings(&["3"])).unwrap(), Reply::Exit(3));
        assert_eq!(handle_exit(&strings(&["0"])).unwrap(), Reply::Exit(0));
    }

    #[test]
    fn test_exit_not_a_number() {
        let err = handle_exit(&strings(&["abc"])).unwrap_err();
        assert_eq!(err.exit_status(), Some(1));
    }

    #[test]
    fn test_exit_wrong_arity() {
        for args in [strings(&[]), strings(&["1", "2"])] {
            let err = handle_exit(&args).unwrap_err();
            assert_eq!(err.to_string(), "exit: wrong number of arguments");
            assert_eq!(err.exit_status(), None);
        }
    }

    #[test]
    fn test_type_builtin() {
        let ctx = Context::new("/", None, Vec::new());
        let result = handle_type(&strings(&["cd"]), &ctx).unwrap();
        assert_eq!(result, Reply::Output("cd is a shell builtin\n".to_string()));
    }

    #[test]
    fn test_type_info_string() {
        let ctx = Context::new("/", None, Vec::new());
        assert_eq!(type_info_string("echo", &ctx), "echo is a shell builtin");
        assert_eq!(
            type_info_string("nonexistent_xyz", &ctx),
            "nonexistent_xyz: not found"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_type_external() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("tool");
        fs::write(&tool, "").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let ctx = Context::new("/", None, vec![dir.path().to_path_buf()]);
        assert_eq!(
            type_info_string("tool", &ctx),
            format!("tool is {}", tool.display())
        );
    }

    #[test]
    fn test_type_wrong_arity() {
        let ctx = Context::new("/", None, Vec::new());
        for args in [strings(&[]), strings(&["echo", "pwd"])] {
            let err = handle_type(&args, &ctx).unwrap_err();
            assert_eq!(err.to_string(), "type: wrong number of arguments");
        }
    }

    #[test]
    fn test_cd_wrong_arity() {
        let mut ctx = Context::new("/", None, Vec::new());
        let mut diag: Vec<u8> = Vec::new();
        for args in [strings(&[]), strings(&["dir1", "dir2"])] {
            let err = handle_cd(&args, &mut ctx, &mut diag).unwrap_err();
            assert_eq!(err.to_string(), "cd: wrong number of arguments");
        }
        assert_eq!(ctx.cwd(), Path::new("/"));
    }

    #[test]
    fn test_cd_relative_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let mut ctx = context_in(dir.path());
        let expected = ctx.cwd().join("sub");
        let mut diag: Vec<u8> = Vec::new();

        let reply = handle_cd(&strings(&["sub"]), &mut ctx, &mut diag).unwrap();
        assert_eq!(reply, Reply::Silent);
        assert_eq!(ctx.cwd(), expected.as_path());

        let target = expected.to_string_lossy().into_owned();
        handle_cd(&[target.clone()], &mut ctx, &mut diag).unwrap();
        handle_cd(&[target], &mut ctx, &mut diag).unwrap();
        assert_eq!(ctx.cwd(), expected.as_path());

        handle_cd(&strings(&[".."]), &mut ctx, &mut diag).unwrap();
        assert_eq!(ctx.cwd(), fs::canonicalize(dir.path()).unwrap().as_path());
        assert!(diag.is_empty());
    }

    #[test]
    fn test_cd_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = fs::canonicalize(dir.path()).unwrap();
        let mut ctx = Context::new("/", Some(home.clone()), Vec::new());
        let mut diag: Vec<u8> = Vec::new();

        handle_cd(&strings(&["~"]), &mut ctx, &mut diag).unwrap();
        assert_eq!(ctx.cwd(), home.as_path());
    }

    #[test]
    fn test_cd_without_home_reports_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("~")).unwrap();
        let mut ctx = context_in(dir.path());
        let expected: PathBuf = ctx.cwd().join("~");
        let mut diag: Vec<u8> = Vec::new();

        handle_cd(&strings(&["~"]), &mut ctx, &mut diag).unwrap();
        assert_eq!(ctx.cwd(), expected.as_path());
        assert_eq!(String::from_utf8(diag).unwrap(), "cd: HOME not set\n");
    }

    #[test]
    fn test_cd_missing_directory() {
        let mut ctx = Context::new("/", None, Vec::new());
        let mut diag: Vec<u8> = Vec::new();
        let err = handle_cd(&strings(&["/nonexistent_dir_xyz"]), &mut ctx, &mut diag).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cd: /nonexistent_dir_xyz: No such file or directory"
        );
        assert_eq!(ctx.cwd(), Path::new("/"));
    }

    #[test]
    fn test_cd_into_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("plain.txt"), "x").unwrap();
        let mut ctx = context_in(dir.path());
        let before = ctx.cwd().to_path_buf();
        let mut diag: Vec<u8> = Vec::new();

        let err = handle_cd(&strings(&["plain.txt"]), &mut ctx, &mut diag).unwrap_err();
        assert_eq!(err.to_string(), "plain.txt is not a directory");
        assert_eq!(ctx.cwd(), before.as_path());
    }

    #[test]
    fn test_run_dispatches_by_variant() {
        let mut ctx = Context::new("/", None, Vec::new());
        let mut diag: Vec<u8> = Vec::new();
        let reply = Builtin::Echo
            .run(&strings(&["a", "b"]), &mut ctx, &mut diag)
            .unwrap();
        assert_eq!(reply, Reply::Output("a b\n".to_string()));
        let reply = Builtin::Exit.run(&strings(&["7"]), &mut ctx, &mut diag).unwrap();
        assert_eq!(reply, Reply::Exit(7));
    }
}
