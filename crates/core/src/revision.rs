//! Revision token normalization.
//!
//! Users name revisions in several ways: a single revision copied out of
//! `svn log` (`43` or `r43`), a friendly inclusive range (`42-50`,
//! `42-HEAD`) or svn's own range syntax (`41:50`, `42:41` to undo r42).
//! All of them normalize to a [`RevisionRange`] whose `begin` is the
//! revision just before the first included change, which is what
//! `svn merge -r` and `svn diff -r` expect.

use std::fmt;
use std::str::FromStr;

use crate::errors::RevisionError;

/// The upper bound of a revision range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    Number(i64),
    Head,
}

impl Revision {
    fn parse(s: &str) -> Result<Self, RevisionError> {
        if s == "HEAD" {
            return Ok(Revision::Head);
        }
        s.parse::<i64>()
            .map(Revision::Number)
            .map_err(|_| RevisionError::InvalidNumber(s.to_string()))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Number(n) => write!(f, "{}", n),
            Revision::Head => f.write_str("HEAD"),
        }
    }
}

impl From<i64> for Revision {
    fn from(n: i64) -> Self {
        Revision::Number(n)
    }
}

/// An exclusive-start, inclusive-end revision range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionRange {
    pub begin: i64,
    pub end: Revision,
}

impl RevisionRange {
    pub fn new(begin: i64, end: impl Into<Revision>) -> Self {
        Self {
            begin,
            end: end.into(),
        }
    }

    /// The range in `svn -r` syntax, e.g. `4506:4508`.
    pub fn to_svn_arg(&self) -> String {
        format!("{}:{}", self.begin, self.end)
    }

    /// The range of log entries it covers, e.g. `4507:4508`.
    pub fn log_arg(&self) -> String {
        format!("{}:{}", self.begin.saturating_add(1), self.end)
    }

    /// The same range applied backwards, e.g. `4508:4506`.
    pub fn reversed_arg(&self) -> String {
        format!("{}:{}", self.end, self.begin)
    }
}

impl FromStr for RevisionRange {
    type Err = RevisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

/// Parse a revision token into a [`RevisionRange`].
pub fn normalize(token: &str) -> Result<RevisionRange, RevisionError> {
    let token = token.strip_prefix('r').unwrap_or(token);

    if let Some((start, end)) = token.split_once('-') {
        let begin = parse_number(start)? - 1;
        let end = Revision::parse(end)?;
        if let Revision::Number(n) = end {
            if begin >= n {
                return Err(RevisionError::EmptyRange {
                    start: begin + 1,
                    end: end.to_string(),
                });
            }
        }
        return Ok(RevisionRange { begin, end });
    }

    if let Some((start, end)) = token.split_once(':') {
        let begin = parse_number(start)?;
        // the log of a range starts one past `begin`
        if begin.checked_add(1).is_none() {
            return Err(RevisionError::OutOfRange(start.to_string()));
        }
        return Ok(RevisionRange {
            begin,
            end: Revision::parse(end)?,
        });
    }

    let rev = parse_number(token)?;
    Ok(RevisionRange::new(rev - 1, rev))
}

/// Whether a token names more than one revision (affects only wording).
pub fn is_span(token: &str) -> bool {
    token.contains('-') || token.contains(':')
}

fn parse_number(s: &str) -> Result<i64, RevisionError> {
    s.parse::<i64>()
        .map_err(|_| RevisionError::InvalidNumber(s.to_string()))
}
