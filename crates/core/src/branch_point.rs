//! Finding the revisions that bound a branch's own history.

use tracing::debug;

use crate::errors::HistoryError;
use crate::svn::{parse_svn_log, SvnRunner};
use crate::CoreError;

/// The first and last revisions committed on a branch.
///
/// `oldest` is normally the copy that created the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchPoint {
    pub oldest: i64,
    pub newest: i64,
}

/// Query the history of `url` up to the copy that created it.
pub fn find_branch_point<R: SvnRunner>(runner: &R, url: &str) -> Result<BranchPoint, CoreError> {
    let xml = runner.log(url, true)?;
    let point = branch_point_from_log(url, &xml)?;
    debug!(url, oldest = point.oldest, newest = point.newest, "found branch point");
    Ok(point)
}

/// Extract the [`BranchPoint`] from `svn log --xml --stop-on-copy` output.
pub fn branch_point_from_log(url: &str, xml: &str) -> Result<BranchPoint, HistoryError> {
    let entries = parse_svn_log(xml).map_err(|_| HistoryError::Unparsable {
        url: url.to_string(),
        raw: xml.to_string(),
    })?;
    let revisions = entries.iter().map(|e| e.revision);
    match (revisions.clone().min(), revisions.max()) {
        (Some(oldest), Some(newest)) => Ok(BranchPoint { oldest, newest }),
        _ => Err(HistoryError::Empty {
            url: url.to_string(),
        }),
    }
}
