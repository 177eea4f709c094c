use std::fmt;

pub mod bulk;
pub mod error;
pub mod extract;
#[cfg(feature = "pdf")]
pub mod pdftext;
pub mod roster;
pub mod row;

pub use bulk::{extract_bulk, extract_bulk_with_pattern, BulkPattern};
pub use error::RosterError;
pub use extract::{extract, PdfBackend, TextExtractor};
pub use roster::{parse_members, parse_members_file, OutputFormat, ParseMode};
pub use row::normalize_row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Maps a single-character roster marker; anything but `F` is male.
    pub fn from_marker(marker: &str) -> Self {
        if marker == "F" {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("FEMALE"),
            Gender::Male => f.write_str("MALE"),
        }
    }
}

/// Member grouping. The roster parsers only ever assign `Regular`; the prep
/// categories are set by hand downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Regular,
    TemplePrep,
    MissionPrep,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Regular => f.write_str("REGULAR"),
            Category::TemplePrep => f.write_str("TEMPLE_PREP"),
            Category::MissionPrep => f.write_str("MISSION_PREP"),
        }
    }
}

/// One member pulled out of a roster. The name is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub name: String,
    pub gender: Gender,
    pub category: Category,
}

impl MemberRecord {
    /// Builds a `Regular` record, or `None` when the trimmed name is empty.
    pub fn regular(name: &str, gender: Gender) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(MemberRecord {
            name: name.to_string(),
            gender,
            category: Category::Regular,
        })
    }
}
