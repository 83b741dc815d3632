use std::path::{Path, PathBuf};

use nix::unistd::{AccessFlags, access};

pub struct PathResolver;

impl PathResolver {
    /// Resolve a command name to an executable path. Names containing a
    /// separator bypass the search path and are checked directly (relative
    /// to `cwd`); bare names are joined with each search directory in order
    /// and the first executable match wins.
    pub fn resolve(&self, command: &str, search_path: &[PathBuf], cwd: &Path) -> Option<PathBuf> {
        if command.contains('/') {
            let path = Path::new(command);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            return is_executable(&path).then_some(path);
        }

        search_path
            .iter()
            .map(|dir| dir.join(command))
            .find(|candidate| is_executable(candidate))
    }
}

fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
