use std::fs;
use std::path::Path;

use tracing::info;

use crate::bulk::extract_bulk_with_pattern;
use crate::error::RosterError;
use crate::extract::TextExtractor;
use crate::row::normalize_row;
use crate::MemberRecord;

/// How the roster text is turned into members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Whole-document patterns.
    #[default]
    Bulk,
    /// Normalize each line on its own.
    LineByLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Names,
    /// `Name, GENDER`
    NameGender,
}

pub fn parse_members(path: &Path, mode: ParseMode) -> Result<Vec<MemberRecord>, RosterError> {
    parse_members_with(&TextExtractor::default(), path, mode)
}

pub fn parse_members_with(
    extractor: &TextExtractor,
    path: &Path,
    mode: ParseMode,
) -> Result<Vec<MemberRecord>, RosterError> {
    let text = extractor.extract(path)?;
    let members = parse_text(&text, mode);
    info!(count = members.len(), ?mode, path = %path.display(), "parsed roster");
    Ok(members)
}

/// Parse already-extracted roster text.
pub fn parse_text(text: &str, mode: ParseMode) -> Vec<MemberRecord> {
    match mode {
        ParseMode::Bulk => extract_bulk_with_pattern(text).0,
        ParseMode::LineByLine => text.split('\n').filter_map(normalize_row).collect(),
    }
}

/// Member names in the order they appear in the roster.
pub fn parse_members_file(path: &Path, mode: ParseMode) -> Result<Vec<String>, RosterError> {
    Ok(parse_members(path, mode)?
        .into_iter()
        .map(|m| m.name)
        .collect())
}

pub fn format_record(record: &MemberRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::Names => record.name.clone(),
        OutputFormat::NameGender => format!("{}, {}", record.name, record.gender),
    }
}

/// Newline-joined list, without a trailing newline.
pub fn render_list(records: &[MemberRecord], format: OutputFormat) -> String {
    records
        .iter()
        .map(|r| format_record(r, format))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overwrites `path` with the rendered list.
pub fn write_output(
    path: &Path,
    records: &[MemberRecord],
    format: OutputFormat,
) -> Result<(), RosterError> {
    fs::write(path, render_list(records, format))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;
    use tempfile::TempDir;

    const LINE_ROSTER: &str = "Count: 3\n\
                               Adams, Morgan M 29 Jan\n\
                               \n\
                               Smith, Jane F jane@example.com\n\
                               For Church Use Only\n\
                               Adams, Morgan M\n";

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn line_by_line_keeps_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "roster.txt", LINE_ROSTER);

        let names = parse_members_file(&path, ParseMode::LineByLine).unwrap();
        assert_eq!(names, vec!["Morgan Adams", "Jane Smith", "Morgan Adams"]);
    }

    #[test]
    fn bulk_is_the_default_mode() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "roster.txt", "Adams, Morgan\nM\n29 Jan 1990\n");

        let names = parse_members_file(&path, ParseMode::default()).unwrap();
        assert_eq!(names, vec!["Morgan Adams"]);
    }

    #[test]
    fn modes_disagree_on_line_roster() {
        // Bulk patterns need the marker on its own line or fused to a date.
        assert!(parse_text(LINE_ROSTER, ParseMode::Bulk).is_empty());
        assert_eq!(parse_text(LINE_ROSTER, ParseMode::LineByLine).len(), 3);
    }

    #[test]
    fn missing_file_propagates() {
        let err = parse_members_file(Path::new("/nowhere/members.txt"), ParseMode::Bulk)
            .unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[test]
    fn name_gender_format() {
        let records = parse_text(LINE_ROSTER, ParseMode::LineByLine);
        assert_eq!(
            render_list(&records, OutputFormat::NameGender),
            "Morgan Adams, MALE\nJane Smith, FEMALE\nMorgan Adams, MALE"
        );
        assert_eq!(records[1].gender, Gender::Female);
    }

    #[test]
    fn output_is_overwritten_and_stable() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("parsed_members.txt");
        fs::write(&out, "stale contents that are longer than the list").unwrap();

        let records = parse_text(LINE_ROSTER, ParseMode::LineByLine);
        write_output(&out, &records, OutputFormat::Names).unwrap();
        let first = fs::read_to_string(&out).unwrap();
        write_output(&out, &records, OutputFormat::Names).unwrap();

        assert_eq!(first, "Morgan Adams\nJane Smith\nMorgan Adams");
        assert_eq!(fs::read_to_string(&out).unwrap(), first);
    }
}
