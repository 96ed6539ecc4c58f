//! The sub-command layer: compose URL rewriting, revision ranges and branch
//! points into svn command lines, print them, and run them.
//!
//! Every command prints exactly what it is about to run before running it.
//! With `dry_run` set, commands that would change the working copy or the
//! repository are printed but not run; history and diffs are still shown.

use std::io::Write;

use tracing::{debug, info};

use crate::branch_path::{container_url, parse_listing, resolve_branch, resolve_tag, ListKind, RepoUrl};
use crate::branch_point::{find_branch_point, BranchPoint};
use crate::errors::{CoreError, UnsafeOperation};
use crate::revision::{is_span, normalize, RevisionRange};
use crate::svn::{parse_svn_info, SvnCommand, SvnRunner};

/// The revision token meaning "everything on the branch".
pub const ALL_REVISIONS: &str = "ALL";

/// Name of the mainline.
pub const TRUNK: &str = "trunk";

/// Options for [`CommandEngine::merge`].
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    /// Revision token; `None` or `"ALL"` merges the whole branch.
    pub revision: Option<String>,
    /// Branch (or tag, with `tag`) to merge from.
    pub source: String,
    /// Working copy to merge into.
    pub path: String,
    pub tag: bool,
    pub reintegrate: bool,
    /// Passed through as `svn merge --accept`.
    pub accept: Option<String>,
    /// Show a diff instead of merging.
    pub diff: bool,
    pub dry_run: bool,
}

/// Options for [`CommandEngine::switch`].
#[derive(Debug, Clone, Default)]
pub struct SwitchRequest {
    /// Target branch; `None` just prints the current URL.
    pub branch: Option<String>,
    pub path: String,
    /// Treat `branch` as a tag name.
    pub tag: bool,
    /// Copy the current branch to the target first.
    pub create: bool,
    /// Commit message for the copy.
    pub message: Option<String>,
    pub dry_run: bool,
}

/// Runs eazysvn sub-commands against an [`SvnRunner`], writing
/// user-facing output to `out`.
pub struct CommandEngine<R, W> {
    runner: R,
    out: W,
}

impl<R: SvnRunner, W: Write> CommandEngine<R, W> {
    pub fn new(runner: R, out: W) -> Self {
        Self { runner, out }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// URL of the working copy at `path`.
    pub fn current_branch(&self, path: &str) -> Result<RepoUrl, CoreError> {
        let xml = self.runner.info(path)?;
        let info = parse_svn_info(&xml)?;
        debug!(path, url = %info.url, "current branch");
        Ok(RepoUrl::parse(&info.url))
    }

    /// Names of all branches or tags next to the working copy at `path`.
    pub fn list(&mut self, kind: ListKind, path: &str) -> Result<Vec<String>, CoreError> {
        let current = self.current_branch(path)?;
        let container = container_url(kind, &current)?;
        let listing = self.runner.list(&container.to_string())?;
        let names = parse_listing(&listing);
        for name in &names {
            writeln!(self.out, "{}", name)?;
        }
        Ok(names)
    }

    /// Print and return the URL of `branch` (or the current URL).
    pub fn branch_url(
        &mut self,
        branch: Option<&str>,
        path: &str,
        tag: bool,
    ) -> Result<RepoUrl, CoreError> {
        let current = self.current_branch(path)?;
        let url = match branch {
            Some(name) => resolve_branch(&tag_path(name, tag), &current),
            None => current,
        };
        writeln!(self.out, "{}", url)?;
        Ok(url)
    }

    /// Print and return the revision at which `branch` (or the current
    /// branch) was created.
    pub fn branch_point(&mut self, branch: Option<&str>, path: &str) -> Result<BranchPoint, CoreError> {
        let url = self.branch_or_current(branch, path)?;
        let point = find_branch_point(&self.runner, &url.to_string())?;
        writeln!(self.out, "{}", point.oldest)?;
        Ok(point)
    }

    // -----------------------------------------------------------------------
    // Merging
    // -----------------------------------------------------------------------

    pub fn merge(&mut self, req: &MergeRequest) -> Result<(), CoreError> {
        let current = self.current_branch(&req.path)?;
        let source = if req.tag {
            resolve_tag(&req.source, &current)
        } else {
            resolve_branch(&req.source, &current)
        };
        let source_url = source.to_string();
        let label = source_label(&req.source, req.tag);

        let (range, msg) = match req.revision.as_deref() {
            None | Some(ALL_REVISIONS) => {
                let point = find_branch_point(&self.runner, &source_url)?;
                // all of trunk means everything since this branch was made
                let begin = if req.source == TRUNK {
                    find_branch_point(&self.runner, &current.to_string())?.oldest
                } else {
                    point.oldest
                };
                (RevisionRange::new(begin, point.newest), format!("Merge {}", label))
            }
            Some(token) => {
                let range = normalize(token)?;
                (range, format!("Merge {} from {}", describe(token), label))
            }
        };

        let cmd = if req.diff {
            SvnCommand::diff(range.to_svn_arg(), source_url.as_str())
        } else {
            let mut cmd = SvnCommand::new("merge");
            cmd = if req.reintegrate {
                cmd.arg("--reintegrate")
            } else {
                cmd.arg("-r").arg(range.to_svn_arg())
            };
            if let Some(ref accept) = req.accept {
                cmd = cmd.arg("--accept").arg(accept.as_str());
            }
            cmd.arg(source_url.as_str()).arg(req.path.as_str())
        };

        if req.diff {
            writeln!(self.out, "{}", msg)?;
        } else {
            writeln!(self.out, "{} with\n\n  {}\n", msg, cmd)?;
        }
        self.show(&SvnCommand::log(range.log_arg(), source_url.as_str()))?;
        if req.diff {
            writeln!(self.out, "\n  {}\n", cmd)?;
        }
        self.execute(&cmd, req.dry_run)
    }

    /// Reverse-apply the revisions named by `token` to the working copy.
    pub fn revert(&mut self, token: &str, path: &str, dry_run: bool) -> Result<(), CoreError> {
        if token == ALL_REVISIONS {
            return Err(UnsafeOperation::RevertAll.into());
        }
        let range = normalize(token)?;
        let cmd = SvnCommand::new("merge")
            .arg("-r")
            .arg(range.reversed_arg())
            .arg(path);

        writeln!(self.out, "Revert {} with\n\n  {}\n", describe(token), cmd)?;
        self.show(&SvnCommand::log(range.log_arg(), path))?;
        self.execute(&cmd, dry_run)
    }

    /// Show the combined diff of everything committed on a branch.
    pub fn branch_diff(&mut self, branch: Option<&str>, path: &str) -> Result<(), CoreError> {
        let url = self.branch_or_current(branch, path)?.to_string();
        let point = find_branch_point(&self.runner, &url)?;
        let cmd = SvnCommand::diff(
            RevisionRange::new(point.oldest, point.newest).to_svn_arg(),
            url,
        );
        writeln!(self.out, "{}", cmd)?;
        self.show(&cmd)
    }

    // -----------------------------------------------------------------------
    // Branch management
    // -----------------------------------------------------------------------

    pub fn switch(&mut self, req: &SwitchRequest) -> Result<(), CoreError> {
        let Some(ref name) = req.branch else {
            let current = self.current_branch(&req.path)?;
            writeln!(self.out, "{}", current)?;
            return Ok(());
        };

        let current = self.current_branch(&req.path)?;
        let target = resolve_branch(&tag_path(name, req.tag), &current);

        if req.create {
            if target == current {
                return Err(UnsafeOperation::BranchIsCurrent {
                    url: target.to_string(),
                }
                .into());
            }
            let copy = SvnCommand::new("cp")
                .arg(current.to_string())
                .arg(target.to_string())
                .message(req.message.as_deref());
            writeln!(self.out, "{}", copy)?;
            self.execute(&copy, req.dry_run)?;
        }

        let cmd = SvnCommand::new("switch")
            .arg(target.to_string())
            .arg(req.path.as_str());
        writeln!(self.out, "{}", cmd)?;
        self.execute(&cmd, req.dry_run)
    }

    /// Copy the working copy at `path` to a new tag.
    pub fn tag(
        &mut self,
        name: &str,
        path: &str,
        message: Option<&str>,
        dry_run: bool,
    ) -> Result<(), CoreError> {
        let current = self.current_branch(path)?;
        let tag_url = resolve_tag(name, &current);
        let cmd = SvnCommand::new("cp")
            .arg(path)
            .arg(tag_url.to_string())
            .message(message);
        writeln!(self.out, "{}", cmd)?;
        self.execute(&cmd, dry_run)
    }

    pub fn remove_branch(
        &mut self,
        name: &str,
        path: &str,
        message: Option<&str>,
        dry_run: bool,
    ) -> Result<(), CoreError> {
        let current = self.current_branch(path)?;
        let url = resolve_branch(name, &current);
        let cmd = SvnCommand::new("rm").arg(url.to_string()).message(message);
        writeln!(self.out, "{}", cmd)?;
        self.execute(&cmd, dry_run)
    }

    pub fn move_branch(
        &mut self,
        old: &str,
        new: &str,
        path: &str,
        message: Option<&str>,
        dry_run: bool,
    ) -> Result<(), CoreError> {
        let current = self.current_branch(path)?;
        let cmd = SvnCommand::new("mv")
            .arg(resolve_branch(old, &current).to_string())
            .arg(resolve_branch(new, &current).to_string())
            .message(message);
        writeln!(self.out, "{}", cmd)?;
        self.execute(&cmd, dry_run)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn branch_or_current(&self, branch: Option<&str>, path: &str) -> Result<RepoUrl, CoreError> {
        let current = self.current_branch(path)?;
        Ok(match branch {
            Some(name) => resolve_branch(name, &current),
            None => current,
        })
    }

    /// Run a read-only command, interleaving its output with ours.
    fn show(&mut self, cmd: &SvnCommand) -> Result<(), CoreError> {
        self.out.flush()?;
        self.runner.run(cmd)?;
        Ok(())
    }

    /// Run `cmd` unless this is a dry run.
    fn execute(&mut self, cmd: &SvnCommand, dry_run: bool) -> Result<(), CoreError> {
        if dry_run {
            debug!(%cmd, "dry run, not executing");
            return Ok(());
        }
        info!(%cmd, "executing");
        self.show(cmd)
    }
}

/// `tags/NAME` when looking for a tag through the branch resolver.
fn tag_path(name: &str, tag: bool) -> String {
    if tag {
        format!("tags/{}", name)
    } else {
        name.to_string()
    }
}

/// How a merge source is named in messages: `foo branch`, `1.0 tag`,
/// `trunk`.
fn source_label(name: &str, tag: bool) -> String {
    if name == TRUNK || name.ends_with("branch") {
        name.to_string()
    } else if tag {
        format!("{} tag", name)
    } else {
        format!("{} branch", name)
    }
}

fn describe(token: &str) -> String {
    if is_span(token) {
        format!("revisions {}", token)
    } else {
        format!("revision {}", token)
    }
}
