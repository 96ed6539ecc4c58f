//! Rewriting repository URLs between trunk, branches and tags.
//!
//! Given the URL of a working copy, the conventional `trunk`, `branches`,
//! `tags`, `branch` and `tag` path segments tell us where the branch name
//! lives. Swapping that one "pivot" segment (plus the name after it) gives
//! the URL of the same subdirectory on another branch or tag.

use std::fmt;

use tracing::warn;

use crate::errors::LayoutError;

const TRUNK: &str = "trunk";
const BRANCH_MARKERS: [&str; 4] = ["branch", "branches", "tag", "tags"];

/// A repository URL viewed as its `/`-separated segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    segments: Vec<String>,
    /// Number of leading segments that make up `scheme://host`.
    root_len: usize,
}

impl RepoUrl {
    pub fn parse(url: &str) -> Self {
        let segments: Vec<String> = url.split('/').map(str::to_string).collect();
        let root_len = match segments.as_slice() {
            [scheme, empty, ..] if scheme.ends_with(':') && empty.is_empty() => {
                3.min(segments.len())
            }
            _ => 0,
        };
        Self { segments, root_len }
    }

    /// Whether any path segment is a trunk/branch/tag marker.
    pub fn has_layout_marker(&self) -> bool {
        self.path_segments()
            .iter()
            .any(|s| s == TRUNK || BRANCH_MARKERS.contains(&s.as_str()))
    }

    fn path_segments(&self) -> &[String] {
        &self.segments[self.root_len..]
    }

    fn with_path(&self, path: Vec<String>) -> Self {
        let mut segments = self.segments[..self.root_len].to_vec();
        segments.extend(path);
        Self {
            segments,
            root_len: self.root_len,
        }
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for RepoUrl {
    fn from(url: &str) -> Self {
        RepoUrl::parse(url)
    }
}

/// Compute the URL of `target` (a branch name, `trunk`, or a path such as
/// `tags/1.0`) corresponding to `current`.
///
/// Layouts without any marker segment come back unchanged.
pub fn resolve_branch(target: &str, current: &RepoUrl) -> RepoUrl {
    let is_path = target.contains('/');
    let wants_trunk = target == TRUNK;
    let path = current.path_segments();
    let mut out = Vec::with_capacity(path.len() + 1);

    let mut i = 0;
    while i < path.len() {
        let seg = path[i].as_str();
        if BRANCH_MARKERS.contains(&seg) {
            // skip the old branch/tag name
            i += 1;
            if wants_trunk {
                out.push(TRUNK.to_string());
            } else {
                if !is_path {
                    let marker = match seg {
                        "tag" | "tags" => "branches",
                        other => other,
                    };
                    out.push(marker.to_string());
                }
                out.push(target.to_string());
            }
        } else if seg == TRUNK && !wants_trunk {
            if !is_path {
                out.push("branches".to_string());
            }
            out.push(target.to_string());
        } else {
            out.push(seg.to_string());
        }
        i += 1;
    }

    if !current.has_layout_marker() {
        warn!(url = %current, target, "no trunk/branches/tags segment in URL, leaving it unchanged");
    }
    current.with_path(out)
}

/// Compute the URL of tag `name` corresponding to `current`.
///
/// Always lands in a tag container: `tags` for `trunk`, `branches` and
/// `tags`, `tag` for the singular `branch` and `tag`.
pub fn resolve_tag(name: &str, current: &RepoUrl) -> RepoUrl {
    let path = current.path_segments();
    let mut out = Vec::with_capacity(path.len() + 1);

    let mut i = 0;
    while i < path.len() {
        let seg = path[i].as_str();
        match seg {
            "branches" | "tags" => {
                i += 1;
                out.push("tags".to_string());
                out.push(name.to_string());
            }
            "branch" | "tag" => {
                i += 1;
                out.push("tag".to_string());
                out.push(name.to_string());
            }
            TRUNK => {
                out.push("tags".to_string());
                out.push(name.to_string());
            }
            _ => out.push(seg.to_string()),
        }
        i += 1;
    }

    if !current.has_layout_marker() {
        warn!(url = %current, name, "no trunk/branches/tags segment in URL, leaving it unchanged");
    }
    current.with_path(out)
}

/// Which kind of container to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Branches,
    Tags,
}

/// Find the URL of the directory holding all branches (or tags) of the
/// project `current` belongs to.
///
/// The URL is scanned from its end, so the innermost marker wins.
pub fn container_url(kind: ListKind, current: &RepoUrl) -> Result<RepoUrl, LayoutError> {
    let path = current.path_segments();
    for (idx, seg) in path.iter().enumerate().rev() {
        let replacement = match (kind, seg.as_str()) {
            (ListKind::Branches, "tag" | "branch") => "branch",
            (ListKind::Branches, "tags" | "branches" | "trunk") => "branches",
            (ListKind::Tags, "trunk" | "branches" | "tags") => "tags",
            (ListKind::Tags, "branch" | "tag") => "tag",
            _ => continue,
        };
        let mut out = path[..idx].to_vec();
        out.push(replacement.to_string());
        return Ok(current.with_path(out));
    }
    Err(LayoutError::Unrecognized {
        url: current.to_string(),
    })
}

/// Directory names from `svn list` output, without their trailing `/`.
/// Plain files are skipped.
pub fn parse_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim_end_matches('\r').strip_suffix('/'))
        .map(str::to_string)
        .collect()
}
