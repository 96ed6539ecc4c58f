//! Built-in known-answer checks, run by `eazysvn selftest`.
//!
//! These exercise the pure parts of eazysvn (revision ranges, URL
//! rewriting, branch points) so a user can confirm a build behaves
//! without touching a repository.

use crate::branch_path::{container_url, resolve_branch, resolve_tag, ListKind, RepoUrl};
use crate::branch_point::{branch_point_from_log, BranchPoint};
use crate::revision::{normalize, RevisionRange};

const BASE: &str = "http://dev.worldcookery.com/svn/bla";

const CANNED_LOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<log>
<logentry
   revision="4515">
<author>mg</author>
<date>2007-01-11T16:30:07.775378Z</date>
<msg>Blah blah.</msg>
</logentry>
<logentry
   revision="4504">
<author>mg</author>
<date>2007-01-11T16:29:32.166370Z</date>
<msg>create branch</msg>
</logentry>
</log>
"#;

/// Outcome of a selftest run.
#[derive(Debug, Clone, Default)]
pub struct SelftestReport {
    pub passed: usize,
    /// One line per failed check.
    pub failures: Vec<String>,
}

impl SelftestReport {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn check<T: PartialEq + std::fmt::Debug>(&mut self, name: &str, got: T, expected: T) {
        if got == expected {
            self.passed += 1;
        } else {
            self.failures
                .push(format!("{}: expected {:?}, got {:?}", name, expected, got));
        }
    }
}

pub fn run_selftest() -> SelftestReport {
    let mut report = SelftestReport::default();

    let ranges: [(&str, Result<RevisionRange, ()>); 8] = [
        ("43", Ok(RevisionRange::new(42, 43))),
        ("r43", Ok(RevisionRange::new(42, 43))),
        ("42-21252", Ok(RevisionRange::new(41, 21252))),
        ("41:21252", Ok(RevisionRange::new(41, 21252))),
        ("42:41", Ok(RevisionRange::new(42, 41))),
        ("42-41", Err(())),
        ("r4507-4508", Ok(RevisionRange::new(4506, 4508))),
        ("HEAD", Err(())),
    ];
    for (token, expected) in ranges {
        report.check(
            &format!("revision {}", token),
            normalize(token).map_err(|_| ()),
            expected,
        );
    }

    let branches = [
        ("foobar", "trunk/blergh", "branches/foobar/blergh"),
        ("trunk", "trunk/blergh", "trunk/blergh"),
        ("trunk", "branches/foobar/blergh", "trunk/blergh"),
        ("tag/3.4", "branches/foobar/blergh", "tag/3.4/blergh"),
        ("mybranch", "tags/foobar", "branches/mybranch"),
    ];
    for (target, from, expected) in branches {
        let current = RepoUrl::parse(&format!("{}/{}", BASE, from));
        report.check(
            &format!("branch {} from {}", target, from),
            resolve_branch(target, &current).to_string(),
            format!("{}/{}", BASE, expected),
        );
    }

    let tags = [
        ("foobar", "trunk/blergh", "tags/foobar/blergh"),
        ("foobaz", "branches/foobar/blergh", "tags/foobaz/blergh"),
    ];
    for (target, from, expected) in tags {
        let current = RepoUrl::parse(&format!("{}/{}", BASE, from));
        report.check(
            &format!("tag {} from {}", target, from),
            resolve_tag(target, &current).to_string(),
            format!("{}/{}", BASE, expected),
        );
    }

    let trunk = RepoUrl::parse(&format!("{}/trunk/blergh", BASE));
    for (kind, expected) in [(ListKind::Branches, "branches"), (ListKind::Tags, "tags")] {
        report.check(
            &format!("{:?} container", kind),
            container_url(kind, &trunk).map(|u| u.to_string()).ok(),
            Some(format!("{}/{}", BASE, expected)),
        );
    }

    report.check(
        "branch point",
        branch_point_from_log(&format!("{}/branches/foobar", BASE), CANNED_LOG).ok(),
        Some(BranchPoint {
            oldest: 4504,
            newest: 4515,
        }),
    );

    report
}
