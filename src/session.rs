use std::collections::BTreeSet;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

// Whichever of these is set first wins; which one exists depends on the host.
const HOME_VARS: [&str; 2] = ["HOME", "USERPROFILE"];

/// Process-wide interpreter state. Exactly one of these exists per run;
/// dispatcher and executor borrow it rather than keeping copies.
#[derive(Debug)]
pub struct ShellSession {
    cwd: PathBuf,
    builtin_names: BTreeSet<&'static str>,
}

impl ShellSession {
    pub fn new<I>(builtin_names: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = &'static str>,
    {
        Ok(ShellSession {
            cwd: env::current_dir()?,
            builtin_names: builtin_names.into_iter().collect(),
        })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Only the `cd` builtin calls this.
    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_names.contains(name)
    }

    pub fn builtin_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builtin_names.iter().copied()
    }

    /// Ordered directory list from the process search-path variable. Read
    /// fresh on every call so `PATH` edits made by the user mid-session are
    /// honored.
    pub fn search_path(&self) -> Vec<PathBuf> {
        match env::var_os("PATH") {
            Some(paths) => env::split_paths(&paths).collect(),
            None => Vec::new(),
        }
    }

    pub fn home_dir(&self) -> Option<PathBuf> {
        HOME_VARS
            .iter()
            .find_map(|var| env::var_os(var))
            .map(PathBuf::from)
    }
}
