//! SVN CLI client.

use std::process::{Command, Output, Stdio};

use tracing::{debug, info, instrument, warn};

use super::command::SvnCommand;
use super::runner::SvnRunner;
use crate::config::SvnConfig;
use crate::errors::SvnError;

/// Runs the `svn` binary as a child process.
#[derive(Debug, Clone)]
pub struct SvnClient {
    binary: String,
    username: Option<String>,
    password: Option<String>,
    non_interactive: bool,
}

impl SvnClient {
    /// Create a client that runs `binary` with no credentials.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            username: None,
            password: None,
            non_interactive: true,
        }
    }

    /// Create a client from the `[svn]` config section. Call
    /// [`AppConfig::resolve_env_vars`](crate::config::AppConfig::resolve_env_vars)
    /// first so the password is populated.
    pub fn from_config(config: &SvnConfig) -> Self {
        let client = Self {
            binary: config.binary.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            non_interactive: config.non_interactive,
        };
        debug!(binary = %client.binary, username = ?client.username, "created SvnClient");
        client
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        if let Some(ref username) = self.username {
            cmd.arg("--username").arg(username);
        }
        if let Some(ref password) = self.password {
            cmd.arg("--password").arg(password);
        }
        cmd
    }

    fn query(&self, args: &[&str]) -> Result<String, SvnError> {
        let mut cmd = self.command(args);
        if self.non_interactive {
            cmd.arg("--non-interactive");
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        debug!(cmd = ?format!("{} {}", self.binary, args.join(" ")), "running svn query");
        let output = cmd.output().map_err(|e| self.spawn_error(e))?;
        check_output(output)
    }

    fn spawn_error(&self, e: std::io::Error) -> SvnError {
        if e.kind() == std::io::ErrorKind::NotFound {
            SvnError::BinaryNotFound(self.binary.clone())
        } else {
            SvnError::IoError(e)
        }
    }
}

impl Default for SvnClient {
    fn default() -> Self {
        Self::new("svn")
    }
}

impl SvnRunner for SvnClient {
    #[instrument(skip(self))]
    fn info(&self, target: &str) -> Result<String, SvnError> {
        self.query(&["info", "--xml", target])
    }

    #[instrument(skip(self))]
    fn list(&self, url: &str) -> Result<String, SvnError> {
        self.query(&["list", url])
    }

    #[instrument(skip(self))]
    fn log(&self, url: &str, stop_on_copy: bool) -> Result<String, SvnError> {
        if stop_on_copy {
            self.query(&["log", "--xml", "--stop-on-copy", url])
        } else {
            self.query(&["log", "--xml", url])
        }
    }

    #[instrument(skip(self), fields(cmd = %command))]
    fn run(&self, command: &SvnCommand) -> Result<(), SvnError> {
        let mut args = vec![command.subcommand()];
        args.extend(command.args().iter().map(String::as_str));
        let status = self
            .command(&args)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            if command.is_mutating() {
                info!("svn {} completed", command.subcommand());
            }
        } else {
            warn!(exit_code = status.code().unwrap_or(-1), "svn command failed");
        }
        Ok(())
    }
}

fn check_output(output: Output) -> Result<String, SvnError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        warn!(exit_code, %stderr, "svn command failed");
        return Err(SvnError::CommandFailed { exit_code, stderr });
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = SvnClient::new("/usr/local/bin/svn");
        assert_eq!(client.binary(), "/usr/local/bin/svn");
        assert_eq!(SvnClient::default().binary(), "svn");
    }

    #[test]
    fn test_from_config() {
        let config = SvnConfig {
            binary: "svn".into(),
            username: Some("mg".into()),
            password_env: None,
            non_interactive: false,
            password: Some("s3cret".into()),
        };
        let client = SvnClient::from_config(&config);
        let cmd = client.command(&["info"]);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, ["info", "--username", "mg", "--password", "s3cret"]);
    }

    #[test]
    fn test_missing_binary() {
        let client = SvnClient::new("eazysvn-test-no-such-binary");
        let err = client.info(".").unwrap_err();
        assert!(matches!(err, SvnError::BinaryNotFound(_)));
    }
}
