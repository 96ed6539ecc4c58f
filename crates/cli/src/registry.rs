//! The table of eazysvn sub-commands, their summaries and program-name
//! aliases.
//!
//! Installing the binary under an alias name (e.g. a symlink called
//! `ezmerge`) makes it behave like `eazysvn merge`.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Merge,
    Revert,
    Switch,
    Tag,
    BranchUrl,
    RmBranch,
    MvBranch,
    BranchDiff,
    BranchPoint,
    Selftest,
    Help,
}

impl CommandKind {
    pub const ALL: [CommandKind; 11] = [
        CommandKind::Merge,
        CommandKind::Revert,
        CommandKind::Switch,
        CommandKind::Tag,
        CommandKind::BranchUrl,
        CommandKind::RmBranch,
        CommandKind::MvBranch,
        CommandKind::BranchDiff,
        CommandKind::BranchPoint,
        CommandKind::Selftest,
        CommandKind::Help,
    ];

    /// The sub-command name on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Merge => "merge",
            CommandKind::Revert => "revert",
            CommandKind::Switch => "switch",
            CommandKind::Tag => "tag",
            CommandKind::BranchUrl => "branchurl",
            CommandKind::RmBranch => "rmbranch",
            CommandKind::MvBranch => "mvbranch",
            CommandKind::BranchDiff => "branchdiff",
            CommandKind::BranchPoint => "branchpoint",
            CommandKind::Selftest => "selftest",
            CommandKind::Help => "help",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            CommandKind::Merge => "merge branches",
            CommandKind::Revert => "revert checkins",
            CommandKind::Switch => "switch to a different branch",
            CommandKind::Tag => "make tags",
            CommandKind::BranchUrl => "print full URL of a branch",
            CommandKind::RmBranch => "remove branches",
            CommandKind::MvBranch => "rename branches",
            CommandKind::BranchDiff => "show combined diff of all changes on a branch",
            CommandKind::BranchPoint => "show the revision number when a branch was created",
            CommandKind::Selftest => "run self-tests",
            CommandKind::Help => "this help message",
        }
    }

    /// Program name that runs this sub-command directly.
    pub fn alias(self) -> Option<&'static str> {
        match self {
            CommandKind::Merge => Some("ezmerge"),
            CommandKind::Revert => Some("ezrevert"),
            CommandKind::Switch => Some("ezswitch"),
            CommandKind::BranchUrl => Some("ezbranch"),
            _ => None,
        }
    }

    pub fn from_alias(program: &str) -> Option<CommandKind> {
        Self::ALL.into_iter().find(|kind| kind.alias() == Some(program))
    }
}

/// If the program was invoked under an alias name, insert the matching
/// sub-command after it.
pub fn expand_alias(mut args: Vec<OsString>) -> Vec<OsString> {
    let kind = args
        .first()
        .and_then(|program| Path::new(program).file_stem())
        .and_then(|stem| stem.to_str())
        .and_then(CommandKind::from_alias);

    if let Some(kind) = kind {
        // `ezswitch --version` should still print the version
        let wants_version = args.get(1).is_some_and(|a| a == "--version");
        if !wants_version {
            args.insert(1, kind.name().into());
        }
    }
    args
}

/// The `help` sub-command's listing.
pub fn write_help(out: &mut impl Write, program: &str) -> io::Result<()> {
    let mut kinds = CommandKind::ALL;
    kinds.sort_by_key(|kind| kind.name());
    let width = kinds.iter().map(|k| k.name().len()).max().unwrap_or(0);

    writeln!(out, "usage: {} command arguments", program)?;
    writeln!(out, "where command is one of")?;
    for kind in kinds {
        let alias = kind
            .alias()
            .map(|a| format!(" (aka {})", a))
            .unwrap_or_default();
        writeln!(
            out,
            "  {:<width$} -- {}{}",
            kind.name(),
            kind.summary(),
            alias,
            width = width
        )?;
    }
    writeln!(
        out,
        "Use {} command --help for more information about commands",
        program
    )
}
