//! Error types for the eazysvn core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Svn(#[from] SvnError),

    #[error(transparent)]
    Revision(#[from] RevisionError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Unsafe(#[from] UnsafeOperation),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing user-facing output failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// SVN errors
// ---------------------------------------------------------------------------

/// Errors from SVN CLI operations.
#[derive(Debug, Error)]
pub enum SvnError {
    /// The `svn` binary was not found on `$PATH`.
    #[error("svn binary not found: {0}")]
    BinaryNotFound(String),

    /// An `svn` query exited with a non-zero status.
    #[error("svn command failed (exit {exit_code}): {stderr}")]
    CommandFailed {
        exit_code: i32,
        stderr: String,
    },

    /// Could not parse the XML output produced by `svn`.
    #[error("failed to parse svn XML output: {0}")]
    XmlParseError(String),

    /// Generic I/O wrapper.
    #[error("svn I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Revision errors
// ---------------------------------------------------------------------------

/// Errors from parsing a user-supplied revision token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevisionError {
    /// A hyphen range whose start is not before its end.
    #[error("empty range ({start}-{end})")]
    EmptyRange {
        start: i64,
        end: String,
    },

    /// Part of the token is not a revision number.
    #[error("invalid revision: '{0}'")]
    InvalidNumber(String),

    /// A range start with no revision after it.
    #[error("revision out of range: '{0}'")]
    OutOfRange(String),
}

// ---------------------------------------------------------------------------
// History errors
// ---------------------------------------------------------------------------

/// Errors from reading the history of a branch.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// `svn log --xml` produced something that is not a log document.
    #[error("could not parse svn log output for {url}:\n\n{raw}")]
    Unparsable {
        url: String,
        raw: String,
    },

    /// The log query returned no entries at all.
    #[error("no history found for {url}; is it a branch?")]
    Empty {
        url: String,
    },
}

// ---------------------------------------------------------------------------
// Layout errors
// ---------------------------------------------------------------------------

/// Errors from locating trunk/branches/tags in a repository URL.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(
        "can't figure out the branch structure of {url}\n\
         expected a path element named trunk/branches/tags/branch/tag"
    )]
    Unrecognized {
        url: String,
    },
}

// ---------------------------------------------------------------------------
// Unsafe operations
// ---------------------------------------------------------------------------

/// Operations that are refused outright.
#[derive(Debug, Error)]
pub enum UnsafeOperation {
    #[error("I refuse to revert all checkins in a branch")]
    RevertAll,

    /// `switch -c` resolved to the branch we are already on.
    #[error(
        "can't figure out the branch structure of {url}\n\
         expected a path element named trunk/branches/tags/branch/tag"
    )]
    BranchIsCurrent {
        url: String,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = RevisionError::EmptyRange {
            start: 42,
            end: "41".into(),
        };
        assert_eq!(err.to_string(), "empty range (42-41)");

        let err = UnsafeOperation::RevertAll;
        assert_eq!(
            err.to_string(),
            "I refuse to revert all checkins in a branch"
        );

        let err = HistoryError::Unparsable {
            url: "http://x/branches/foo".into(),
            raw: "garbage".into(),
        };
        assert!(err.to_string().ends_with("garbage"));

        let err = ConfigError::InvalidValue {
            field: "svn.binary".into(),
            detail: "must not be empty".into(),
        };
        assert!(err.to_string().contains("svn.binary"));
    }

    #[test]
    fn test_core_error_from_subsystem() {
        let err: CoreError = RevisionError::InvalidNumber("abc".into()).into();
        assert!(matches!(err, CoreError::Revision(_)));

        let err: CoreError = UnsafeOperation::RevertAll.into();
        assert!(matches!(err, CoreError::Unsafe(_)));

        let err: CoreError = SvnError::BinaryNotFound("svn".into()).into();
        assert!(matches!(err, CoreError::Svn(_)));
    }
}
