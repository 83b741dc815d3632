use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{self, PathBuf};

use super::executor::{ExecError, ExecResult, ExecStatus};
use super::path_resolver::PathResolver;
use crate::session::ShellSession;

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    /// Builtins write all user-visible text, diagnostics included, through
    /// `out`; the executor decides whether that handle is the terminal or a
    /// redirection target.
    fn run(&self, args: &[String], session: &mut ShellSession, out: &mut dyn Write) -> ExecResult;
}

pub struct BuiltinManager {
    commands: HashMap<&'static str, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(EchoCommand));
        mgr.register(Box::new(TypeCommand));
        mgr.register(Box::new(PwdCommand));
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(ExitCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        session: &mut ShellSession,
        out: &mut dyn Write,
    ) -> ExecResult {
        match self.commands.get(name) {
            Some(cmd) => cmd.run(args, session, out),
            None => Err(ExecError::CommandNotFound(name.to_string())),
        }
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EchoCommand;

impl BuiltinCommand for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn run(&self, args: &[String], _session: &mut ShellSession, out: &mut dyn Write) -> ExecResult {
        writeln!(out, "{}", args.join(" "))?;
        Ok(ExecStatus::Code(0))
    }
}

pub struct TypeCommand;

impl BuiltinCommand for TypeCommand {
    fn name(&self) -> &'static str {
        "type"
    }
    fn run(&self, args: &[String], session: &mut ShellSession, out: &mut dyn Write) -> ExecResult {
        let Some(name) = args.first() else {
            return Ok(ExecStatus::Code(0));
        };
        if session.is_builtin(name) {
            writeln!(out, "{} is a shell builtin", name)?;
        } else if let Some(path) =
            PathResolver.resolve(name, &session.search_path(), session.cwd())
        {
            writeln!(out, "{} is {}", name, path.display())?;
        } else {
            writeln!(out, "{}: not found", name)?;
            return Ok(ExecStatus::Code(1));
        }
        Ok(ExecStatus::Code(0))
    }
}

pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn run(&self, _args: &[String], session: &mut ShellSession, out: &mut dyn Write) -> ExecResult {
        writeln!(out, "{}", session.cwd().display())?;
        Ok(ExecStatus::Code(0))
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], session: &mut ShellSession, out: &mut dyn Write) -> ExecResult {
        let raw = args.first().map(String::as_str).unwrap_or("~");
        let arg = raw.trim_start();

        let requested = if let Some(rest) = arg.strip_prefix('~') {
            let Some(home) = session.home_dir() else {
                writeln!(out, "cd: home directory not set")?;
                return Ok(ExecStatus::Code(1));
            };
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                home
            } else {
                home.join(normalize_separators(rest))
            }
        } else {
            let path = PathBuf::from(normalize_separators(arg));
            if path.is_absolute() {
                path
            } else {
                session.cwd().join(path)
            }
        };

        match fs::canonicalize(&requested) {
            Ok(dir) if dir.is_dir() => {
                session.set_cwd(dir);
                Ok(ExecStatus::Code(0))
            }
            _ => {
                writeln!(out, "cd: no such file or directory: {}", raw)?;
                Ok(ExecStatus::Code(1))
            }
        }
    }
}

fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c == '/' || c == '\\' {
                path::MAIN_SEPARATOR
            } else {
                c
            }
        })
        .collect()
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, args: &[String], _session: &mut ShellSession, out: &mut dyn Write) -> ExecResult {
        let code = match args.first() {
            None => 0,
            Some(arg) => match arg.parse::<i32>() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(out, "exit: numeric argument required: {}", arg)?;
                    return Ok(ExecStatus::Code(1));
                }
            },
        };
        Ok(ExecStatus::Exit(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn session() -> ShellSession {
        ShellSession::new(BuiltinManager::new().names().collect::<Vec<_>>()).unwrap()
    }

    fn run(name: &str, args: &[&str], session: &mut ShellSession) -> (ExecStatus, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let status = BuiltinManager::new()
            .execute(name, &args, session, &mut out)
            .unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_echo_joins_arguments_with_single_spaces() {
        let mut session = session();
        let (status, out) = run("echo", &["hello", "world"], &mut session);
        assert_eq!(status, ExecStatus::Code(0));
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn test_echo_without_arguments_prints_a_bare_newline() {
        let mut session = session();
        let (_, out) = run("echo", &[], &mut session);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_type_reports_builtins() {
        let mut session = session();
        let (status, out) = run("type", &["echo"], &mut session);
        assert_eq!(status, ExecStatus::Code(0));
        assert_eq!(out, "echo is a shell builtin\n");
    }

    #[test]
    fn test_type_reports_unknown_names() {
        let mut session = session();
        let (status, out) = run("type", &["nonexistent-xyz"], &mut session);
        assert_eq!(status, ExecStatus::Code(1));
        assert_eq!(out, "nonexistent-xyz: not found\n");
    }

    #[test]
    fn test_type_resolves_external_commands() {
        let mut session = session();
        // `sh` is on the search path everywhere this crate builds.
        let (status, out) = run("type", &["sh"], &mut session);
        assert_eq!(status, ExecStatus::Code(0));
        assert!(out.starts_with("sh is /"), "unexpected output: {}", out);
    }

    #[test]
    fn test_pwd_prints_the_session_cwd() {
        let mut session = session();
        let (_, out) = run("pwd", &[], &mut session);
        assert_eq!(out, format!("{}\n", session.cwd().display()));
    }

    #[test]
    fn test_cd_changes_the_session_cwd() {
        let mut session = session();
        let dir = env::temp_dir();
        let (status, out) = run("cd", &[dir.to_str().unwrap()], &mut session);
        assert_eq!(status, ExecStatus::Code(0));
        assert!(out.is_empty());
        assert_eq!(session.cwd(), fs::canonicalize(&dir).unwrap());
    }

    #[test]
    fn test_cd_to_missing_directory_leaves_cwd_untouched() {
        let mut session = session();
        let before = session.cwd().to_path_buf();
        let (status, out) = run("cd", &["/nonexistent"], &mut session);
        assert_eq!(status, ExecStatus::Code(1));
        assert_eq!(out, "cd: no such file or directory: /nonexistent\n");
        assert_eq!(session.cwd(), before);
    }

    #[test]
    fn test_cd_relative_resolves_against_the_session_cwd() {
        let mut session = session();
        let base = env::temp_dir().join(format!("pocket-shell-cd-{}", std::process::id()));
        fs::create_dir_all(base.join("inner")).unwrap();
        run("cd", &[base.to_str().unwrap()], &mut session);
        let (status, _) = run("cd", &["inner"], &mut session);
        assert_eq!(status, ExecStatus::Code(0));
        assert_eq!(
            session.cwd(),
            fs::canonicalize(base.join("inner")).unwrap()
        );
        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_cd_tilde_goes_home() {
        let mut session = session();
        if let Some(home) = session.home_dir() {
            let (status, out) = run("cd", &["~"], &mut session);
            assert_eq!(status, ExecStatus::Code(0));
            assert!(out.is_empty());
            assert_eq!(session.cwd(), fs::canonicalize(home).unwrap());
        }
    }

    #[test]
    fn test_exit_defaults_to_status_zero() {
        let mut session = session();
        let (status, out) = run("exit", &[], &mut session);
        assert_eq!(status, ExecStatus::Exit(0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_exit_takes_a_numeric_status() {
        let mut session = session();
        let (status, _) = run("exit", &["0"], &mut session);
        assert_eq!(status, ExecStatus::Exit(0));
        let (status, _) = run("exit", &["7"], &mut session);
        assert_eq!(status, ExecStatus::Exit(7));
    }

    #[test]
    fn test_exit_rejects_non_numeric_arguments() {
        let mut session = session();
        let (status, out) = run("exit", &["soon"], &mut session);
        assert_eq!(status, ExecStatus::Code(1));
        assert_eq!(out, "exit: numeric argument required: soon\n");
    }
}
