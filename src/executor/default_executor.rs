use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use super::builtins::BuiltinManager;
use super::executor::{ExecError, ExecResult, ExecStatus, Executor};
use super::path_resolver::PathResolver;
use crate::parser::{ParsedCommand, RedirectMode, Redirection};
use crate::session::ShellSession;

pub struct DefaultExecutor {
    builtins: BuiltinManager,
}

impl DefaultExecutor {
    pub fn new() -> Self {
        DefaultExecutor {
            builtins: BuiltinManager::new(),
        }
    }

    pub fn builtin_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builtins.names()
    }
}

impl Default for DefaultExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for DefaultExecutor {
    fn exec(&mut self, command: &ParsedCommand, session: &mut ShellSession) -> ExecResult {
        if session.is_builtin(&command.name) {
            self.exec_builtin(command, session)
        } else {
            self.exec_external(command, session)
        }
    }
}

impl DefaultExecutor {
    /// Builtins share the external path's redirection behavior: a stdout
    /// target becomes the builtin's output handle, and a stderr target is
    /// still created/truncated even though builtins never write it.
    fn exec_builtin(&self, command: &ParsedCommand, session: &mut ShellSession) -> ExecResult {
        let cwd = session.cwd().to_path_buf();
        if let Some(redirection) = command.redirections.stderr() {
            drop(open_target(redirection, &cwd)?);
        }

        match command.redirections.stdout() {
            Some(redirection) => {
                let mut file = open_target(redirection, &cwd)?;
                let status = self
                    .builtins
                    .execute(&command.name, &command.args, session, &mut file)?;
                file.flush()?;
                Ok(status)
            }
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                let status = self
                    .builtins
                    .execute(&command.name, &command.args, session, &mut out)?;
                out.flush()?;
                Ok(status)
            }
        }
    }

    fn exec_external(&self, command: &ParsedCommand, session: &mut ShellSession) -> ExecResult {
        let path = PathResolver
            .resolve(&command.name, &session.search_path(), session.cwd())
            .ok_or_else(|| ExecError::CommandNotFound(command.name.clone()))?;
        debug!("resolved {} to {}", command.name, path.display());

        let mut child = Command::new(&path);
        child
            .args(&command.args)
            .current_dir(session.cwd())
            .stdin(Stdio::inherit());

        match command.redirections.stdout() {
            Some(redirection) => {
                child.stdout(Stdio::from(open_target(redirection, session.cwd())?));
            }
            None => {
                child.stdout(Stdio::inherit());
            }
        }
        match command.redirections.stderr() {
            Some(redirection) => {
                child.stderr(Stdio::from(open_target(redirection, session.cwd())?));
            }
            None => {
                child.stderr(Stdio::inherit());
            }
        }

        // status() blocks until the child has exited; the target files were
        // moved into the child, so they are closed by the time it returns.
        let status = child.status()?;
        debug!("{} exited with {:?}", command.name, status.code());
        Ok(ExecStatus::Code(status.code().unwrap_or(1)))
    }
}

fn open_target(redirection: &Redirection, cwd: &Path) -> Result<File, ExecError> {
    let target: PathBuf = if redirection.target.is_absolute() {
        redirection.target.clone()
    } else {
        cwd.join(&redirection.target)
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ExecError::Redirect(target.clone(), e))?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true);
    match redirection.mode {
        RedirectMode::Truncate => options.truncate(true),
        RedirectMode::Append => options.append(true),
    };
    options
        .open(&target)
        .map_err(|e| ExecError::Redirect(target, e))
}
