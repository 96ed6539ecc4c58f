//! A printable, runnable `svn` command line.

use std::fmt;

/// One `svn` invocation: the sub-command and its arguments.
///
/// The `Display` form is what gets printed to the user before the command
/// runs, so it mirrors what they would type in a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvnCommand {
    subcommand: &'static str,
    args: Vec<String>,
}

impl SvnCommand {
    pub fn new(subcommand: &'static str) -> Self {
        Self {
            subcommand,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add `-m MESSAGE` when a message was given.
    pub fn message(self, message: Option<&str>) -> Self {
        match message {
            Some(msg) => self.arg("-m").arg(msg),
            None => self,
        }
    }

    pub fn subcommand(&self) -> &str {
        self.subcommand
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether this command changes the working copy or the repository.
    pub fn is_mutating(&self) -> bool {
        !matches!(self.subcommand, "log" | "diff" | "info" | "list")
    }

    pub fn log(range: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new("log").arg("-r").arg(range).arg(target)
    }

    pub fn diff(range: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new("diff").arg("-r").arg(range).arg(target)
    }
}

impl fmt::Display for SvnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svn {}", self.subcommand)?;
        let mut args = self.args.iter();
        while let Some(arg) = args.next() {
            if arg == "-m" {
                if let Some(msg) = args.next() {
                    write!(f, " -m {}", shell_quote(msg))?;
                    continue;
                }
            }
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {}", shell_quote(arg))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
