use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::{Gender, MemberRecord};

/// Header and separator lines found in roster exports.
static SKIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:NameGender|\*\*\*|Count:|Sunday School|Rexburg|For Church Use Only)")
        .unwrap()
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s\-]{7,}\d").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,2}\s?[A-Za-z]{3}\b").unwrap());
static NON_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-ZÀ-ÿ\s,]").unwrap());
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static GENDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(M|F)\b").unwrap());

const MAX_NAME_WORDS: usize = 4;

/// Parse one roster line into a member.
///
/// Returns `None` for blank lines, known headers, and lines with nothing
/// left after contact details and dates are stripped.
pub fn normalize_row(line: &str) -> Option<MemberRecord> {
    if line.trim().is_empty() {
        return None;
    }
    if SKIP_RE.is_match(line) {
        trace!(line, "skipping header row");
        return None;
    }

    let clean = strip_noise(line);
    if clean.is_empty() {
        return None;
    }

    let (gender, rest) = take_gender(&clean);
    let name = reconstruct_name(&rest);

    let record = MemberRecord::regular(&name, gender);
    if record.is_none() {
        trace!(line, "row has no name");
    }
    record
}

fn strip_noise(line: &str) -> String {
    let clean = EMAIL_RE.replace_all(line, " ");
    let clean = PHONE_RE.replace_all(&clean, " ");
    let clean = DATE_RE.replace_all(&clean, " ");
    let clean = NON_NAME_RE.replace_all(&clean, " ");
    collapse_spaces(&clean)
}

fn collapse_spaces(s: &str) -> String {
    SPACES_RE.replace_all(s, " ").trim().to_string()
}

/// Gender comes from the first standalone `M`/`F`; every standalone marker
/// is then dropped from the row.
fn take_gender(clean: &str) -> (Gender, String) {
    match GENDER_RE.find(clean) {
        Some(m) => {
            let gender = Gender::from_marker(m.as_str());
            let rest = GENDER_RE.replace_all(clean, "");
            (gender, collapse_spaces(&rest))
        }
        None => (Gender::Male, clean.to_string()),
    }
}

/// `Last, First Middle` becomes `First Middle Last`; otherwise the first
/// few words are kept as written.
fn reconstruct_name(clean: &str) -> String {
    match clean.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim())
            .trim()
            .to_string(),
        None => clean
            .split_whitespace()
            .take(MAX_NAME_WORDS)
            .collect::<Vec<_>>()
            .join(" "),
    }
}
