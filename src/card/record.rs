use std::path::{Path, PathBuf};

use super::infobox::InfoboxFields;
use super::validate::Gender;
use super::vocab::{COMPOUND_SPECIES_MARKERS, SPECIES_FIRST, TRAILING_SPECIES_MARKERS};

/// Directory used for species names that cannot be split.
pub const ERROR_BUCKET: &str = "ERROR";

/// A record field, in the order it is reported as missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Years,
    Months,
    Weight,
    Gender,
    Note,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Years => "years",
            Field::Months => "months",
            Field::Weight => "weight",
            Field::Gender => "gender",
            Field::Note => "note",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordStatus {
    Complete,
    Partial { missing: Vec<Field> },
}

/// Everything extracted from one screenshot.
#[derive(Clone, Debug, PartialEq)]
pub struct CardRecord {
    pub name: Option<String>,
    pub years: Option<u32>,
    pub months: Option<u32>,
    pub weight: Option<f64>,
    pub gender: Option<Gender>,
    pub note: Option<String>,
    pub source_file: PathBuf,
    pub status: RecordStatus,
}

impl CardRecord {
    /// Builds the final record and decides whether it is complete.
    pub fn finalize(name: Option<&str>, fields: InfoboxFields, source_file: PathBuf) -> Self {
        let present = [
            (Field::Name, name.is_some()),
            (Field::Years, fields.years.is_some()),
            (Field::Months, fields.months.is_some()),
            (Field::Weight, fields.weight.is_some()),
            (Field::Gender, fields.gender.is_some()),
            (Field::Note, fields.note.is_some()),
        ];
        let missing: Vec<Field> = present
            .iter()
            .filter(|(_, found)| !found)
            .map(|(field, _)| *field)
            .collect();

        let status = if missing.is_empty() {
            RecordStatus::Complete
        } else {
            RecordStatus::Partial { missing }
        };

        Self {
            name: name.map(str::to_string),
            years: fields.years,
            months: fields.months,
            weight: fields.weight,
            gender: fields.gender,
            note: fields.note,
            source_file,
            status,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == RecordStatus::Complete
    }

    pub fn missing(&self) -> &[Field] {
        match &self.status {
            RecordStatus::Complete => &[],
            RecordStatus::Partial { missing } => missing,
        }
    }

    /// Where the screenshot belongs. Any record with a name, Partial ones included,
    /// goes to its species folder; only unresolved names go to the error bucket.
    pub fn destination(&self) -> Destination {
        self.name
            .as_deref()
            .map(Destination::from_name)
            .unwrap_or_else(Destination::error_bucket)
    }

    pub fn file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Species and subspecies directory names derived from a display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub species: String,
    pub subspecies: String,
}

impl Destination {
    fn new(species: impl Into<String>, subspecies: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            subspecies: subspecies.into(),
        }
    }

    pub fn error_bucket() -> Self {
        Self::new(ERROR_BUCKET, "")
    }

    /// Splits a display name into species and subspecies.
    ///
    /// Two words are "<subspecies> <species>" unless the first word is one of
    /// [`SPECIES_FIRST`]. Three words either end in a two-word species compound
    /// ("OSTIA VASCA KAVAT") or in the species itself ("FUMING DAX STOVER"), where
    /// the leading two words form the subspecies. A three-word name matching
    /// neither marker maps to the animals root. Other lengths go to the error bucket.
    pub fn from_name(name: &str) -> Self {
        let words: Vec<&str> = name.split_whitespace().collect();
        match words.as_slice() {
            [first, second] if SPECIES_FIRST.contains(first) => Self::new(*first, *second),
            [subspecies, species] => Self::new(*species, *subspecies),
            [first, second, third] if COMPOUND_SPECIES_MARKERS.contains(third) => {
                Self::new(format!("{}_{}", second, third), *first)
            }
            [first, second, third] if TRAILING_SPECIES_MARKERS.contains(third) => {
                Self::new(*third, format!("{}_{}", first, second))
            }
            [_, _, _] => Self::new("", ""),
            _ => Self::error_bucket(),
        }
    }

    /// Directory under `root`; empty components are left out.
    pub fn dir(&self, root: &Path) -> PathBuf {
        [self.species.as_str(), self.subspecies.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .fold(root.to_path_buf(), |path, part| path.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_fields() -> InfoboxFields {
        InfoboxFields {
            years: Some(2),
            months: Some(6),
            weight: Some(12.5),
            gender: Some(Gender::Male),
            note: Some("playful".to_string()),
        }
    }

    #[test]
    fn test_finalize_complete() {
        let record = CardRecord::finalize(
            Some("SLY VULPAPHYLA"),
            full_fields(),
            PathBuf::from("shots/a.png"),
        );
        assert!(record.is_complete());
        assert!(record.missing().is_empty());
        assert_eq!(record.file_name(), "a.png");
    }

    #[test]
    fn test_finalize_partial_lists_missing_in_order() {
        let fields = InfoboxFields {
            months: None,
            note: None,
            ..full_fields()
        };
        let record = CardRecord::finalize(None, fields, PathBuf::from("b.jpg"));
        assert_eq!(
            record.status,
            RecordStatus::Partial {
                missing: vec![Field::Name, Field::Months, Field::Note]
            }
        );
        assert_eq!(record.destination(), Destination::error_bucket());
    }

    #[test]
    fn test_two_word_names() {
        assert_eq!(
            Destination::from_name("BURROWING CRYPTILEX"),
            Destination::new("CRYPTILEX", "BURROWING")
        );
        assert_eq!(
            Destination::from_name("HORRASQUE STORMER"),
            Destination::new("HORRASQUE", "STORMER")
        );
        assert_eq!(
            Destination::from_name("KUBRODON INCARNADINE"),
            Destination::new("KUBRODON", "INCARNADINE")
        );
    }

    #[test]
    fn test_three_word_names() {
        assert_eq!(
            Destination::from_name("OSTIA VASCA KAVAT"),
            Destination::new("VASCA_KAVAT", "OSTIA")
        );
        assert_eq!(
            Destination::from_name("FUMING DAX STOVER"),
            Destination::new("STOVER", "FUMING_DAX")
        );
        assert_eq!(
            Destination::from_name("ALPINE MONITOR SAWGAW"),
            Destination::new("SAWGAW", "ALPINE_MONITOR")
        );
        assert_eq!(Destination::from_name("ONE TWO THREE"), Destination::new("", ""));
    }

    #[test]
    fn test_other_word_counts_go_to_error() {
        assert_eq!(
            Destination::from_name("A B C D"),
            Destination::new("ERROR", "")
        );
        assert_eq!(Destination::from_name("SOLO"), Destination::error_bucket());
        assert_eq!(Destination::from_name(""), Destination::error_bucket());
    }

    #[test]
    fn test_destination_dir() {
        let root = Path::new("/out/Animals");
        assert_eq!(
            Destination::from_name("SLY VULPAPHYLA").dir(root),
            root.join("VULPAPHYLA").join("SLY")
        );
        assert_eq!(Destination::error_bucket().dir(root), root.join("ERROR"));
        assert_eq!(Destination::new("", "").dir(root), root.to_path_buf());
    }
}
