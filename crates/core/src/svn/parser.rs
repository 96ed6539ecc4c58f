//! Parsers for SVN XML output.

use tracing::{debug, warn};

use crate::errors::SvnError;

/// The part of `svn info --xml` that locates a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvnInfo {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvnLogEntry {
    pub revision: i64,
}

pub fn parse_svn_info(xml: &str) -> Result<SvnInfo, SvnError> {
    debug!("parsing svn info XML ({} bytes)", xml.len());
    let url = extract_tag_content(xml, "url")
        .ok_or_else(|| SvnError::XmlParseError("missing <url> in svn info".into()))?;
    Ok(SvnInfo { url })
}

/// Parse `svn log --xml` output, newest entry first as svn prints it.
///
/// Fails when the text is not a `<log>` document at all; individual
/// entries without a usable revision are skipped.
pub fn parse_svn_log(xml: &str) -> Result<Vec<SvnLogEntry>, SvnError> {
    debug!("parsing svn log XML ({} bytes)", xml.len());
    if !is_log_document(xml) {
        return Err(SvnError::XmlParseError("missing <log> element".into()));
    }
    let mut entries = Vec::new();
    let parts: Vec<&str> = xml.split("<logentry").collect();
    for part in parts.iter().skip(1) {
        let entry_xml = match part.find("</logentry>") {
            Some(pos) => &part[..pos],
            None => {
                return Err(SvnError::XmlParseError(
                    "unterminated <logentry> element".into(),
                ))
            }
        };
        let revision = match extract_attribute_from_fragment(entry_xml, "revision")
            .and_then(|s| s.parse::<i64>().ok())
        {
            Some(rev) => rev,
            None => {
                warn!("skipping SVN log entry with missing or unparseable revision attribute");
                continue;
            }
        };
        entries.push(SvnLogEntry { revision });
    }
    debug!(count = entries.len(), "parsed svn log entries");
    Ok(entries)
}

fn is_log_document(xml: &str) -> bool {
    let body = xml.trim();
    let opened = body.contains("<log>") || body.contains("<log ");
    (opened && body.ends_with("</log>")) || body.ends_with("<log/>")
}

fn extract_tag_content(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut search_from = 0;
    while let Some(rel_pos) = xml[search_from..].find(&open) {
        let start_pos = search_from + rel_pos;
        let after_open = &xml[start_pos + open.len()..];
        // the next char must be '>' or whitespace, so <url> does not match <urlencoded>
        if let Some(ch) = after_open.chars().next() {
            if ch != '>' && !ch.is_ascii_whitespace() {
                search_from = start_pos + open.len();
                continue;
            }
        }
        let content_start = match after_open.find('>') {
            Some(pos) => pos + 1,
            None => return None,
        };
        let content = &after_open[content_start..];
        let end_pos = content.find(&close)?;
        return Some(xml_unescape(content[..end_pos].trim()));
    }
    None
}

/// Unescape standard XML entities.
fn xml_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn extract_attribute_from_fragment(fragment: &str, attr: &str) -> Option<String> {
    let tag_end = fragment.find('>').unwrap_or(fragment.len());
    extract_attr_from_str(&fragment[..tag_end], attr)
}

fn extract_attr_from_str(s: &str, attr: &str) -> Option<String> {
    let pattern_dq = format!("{}=\"", attr);
    if let Some(pos) = s.find(&pattern_dq) {
        let after = &s[pos + pattern_dq.len()..];
        let end = after.find('"')?;
        return Some(after[..end].to_string());
    }
    let pattern_sq = format!("{}='", attr);
    if let Some(pos) = s.find(&pattern_sq) {
        let after = &s[pos + pattern_sq.len()..];
        let end = after.find('\'')?;
        return Some(after[..end].to_string());
    }
    None
}
