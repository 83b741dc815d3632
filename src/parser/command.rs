use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub stream: RedirectStream,
    pub mode: RedirectMode,
    pub target: PathBuf,
}

/// At most one redirection per stream. Inserting a redirection for an
/// already-redirected stream replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectionSet {
    stdout: Option<Redirection>,
    stderr: Option<Redirection>,
}

impl RedirectionSet {
    pub fn insert(&mut self, redirection: Redirection) {
        match redirection.stream {
            RedirectStream::Stdout => self.stdout = Some(redirection),
            RedirectStream::Stderr => self.stderr = Some(redirection),
        }
    }

    pub fn stdout(&self) -> Option<&Redirection> {
        self.stdout.as_ref()
    }

    pub fn stderr(&self) -> Option<&Redirection> {
        self.stderr.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_none() && self.stderr.is_none()
    }
}

/// One classified command line: what to run, with what, and where its
/// output streams go. Lives for a single loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
    pub redirections: RedirectionSet,
}
