//! eazysvn core library.
//!
//! This crate holds everything behind the `eazysvn` command: revision token
//! normalization, rewriting repository URLs between trunk, branches and
//! tags, finding branch points, the svn runner, configuration, and the
//! sub-command engine that ties them together.

pub mod branch_path;
pub mod branch_point;
pub mod config;
pub mod engine;
pub mod errors;
pub mod revision;
pub mod selftest;
pub mod svn;

// Re-exports for convenience.
pub use branch_path::{resolve_branch, resolve_tag, ListKind, RepoUrl};
pub use branch_point::{find_branch_point, BranchPoint};
pub use config::AppConfig;
pub use engine::{CommandEngine, MergeRequest, SwitchRequest};
pub use errors::CoreError;
pub use revision::{normalize, Revision, RevisionRange};
pub use svn::{SvnClient, SvnCommand, SvnRunner};
