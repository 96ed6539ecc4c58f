//! The seam between eazysvn's logic and the `svn` binary.

use crate::errors::SvnError;

use super::command::SvnCommand;

/// Everything the command layer needs from svn.
///
/// [`SvnClient`](super::SvnClient) runs the real binary; tests supply a
/// recording stub.
pub trait SvnRunner {
    /// `svn info --xml TARGET`.
    fn info(&self, target: &str) -> Result<String, SvnError>;

    /// `svn list URL`: one entry per line, directories end in `/`.
    fn list(&self, url: &str) -> Result<String, SvnError>;

    /// `svn log --xml URL`, optionally with `--stop-on-copy`.
    fn log(&self, url: &str, stop_on_copy: bool) -> Result<String, SvnError>;

    /// Run a command with its output going straight to the user.
    ///
    /// The outcome of the command itself is not inspected.
    fn run(&self, command: &SvnCommand) -> Result<(), SvnError>;
}

impl<R: SvnRunner + ?Sized> SvnRunner for &R {
    fn info(&self, target: &str) -> Result<String, SvnError> {
        (**self).info(target)
    }

    fn list(&self, url: &str) -> Result<String, SvnError> {
        (**self).list(url)
    }

    fn log(&self, url: &str, stop_on_copy: bool) -> Result<String, SvnError> {
        (**self).log(url, stop_on_copy)
    }

    fn run(&self, command: &SvnCommand) -> Result<(), SvnError> {
        (**self).run(command)
    }
}
