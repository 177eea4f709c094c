use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::{Gender, MemberRecord};

/// `Last, First` on one line, the gender marker alone on the next.
static MULTILINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-ZÀ-ÿ][A-Za-zÀ-ÿ\s]+),\s*([A-ZÀ-ÿ][A-Za-zÀ-ÿ\s]+)\s*\n\s*([MF])\s*\n").unwrap()
});

/// `Last, First` with the marker and birth date fused on, as in
/// `Panibra Merma, Edson JoaquinM14 Nov`.
static INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^,\n]+),\s*([A-Za-z\s]+?)([MF])(\d{1,2}\s+[A-Za-z]{3})").unwrap()
});

/// Which whole-document pattern produced a bulk result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkPattern {
    Multiline,
    Inline,
}

/// Pull members out of a whole roster document.
pub fn extract_bulk(text: &str) -> Vec<MemberRecord> {
    extract_bulk_with_pattern(text).0
}

/// Like [`extract_bulk`], also reporting which pattern was used. The inline
/// pattern only runs when the multi-line one finds nothing at all.
pub fn extract_bulk_with_pattern(text: &str) -> (Vec<MemberRecord>, BulkPattern) {
    let text = text.replace('\u{00A0}', " ");

    let members = scan(&MULTILINE_RE, &text);
    if !members.is_empty() {
        debug!(count = members.len(), "multi-line roster pattern matched");
        return (members, BulkPattern::Multiline);
    }

    let members = scan(&INLINE_RE, &text);
    debug!(count = members.len(), "fell back to inline roster pattern");
    (members, BulkPattern::Inline)
}

fn scan(re: &Regex, text: &str) -> Vec<MemberRecord> {
    re.captures_iter(text).filter_map(|cap| member(&cap)).collect()
}

fn member(cap: &Captures) -> Option<MemberRecord> {
    let last = cap[1].trim();
    let first = cap[2].trim();
    let gender = Gender::from_marker(&cap[3]);
    MemberRecord::regular(&format!("{} {}", first, last), gender)
}
