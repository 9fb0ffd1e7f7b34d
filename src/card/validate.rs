//! Field validators.
//!
//! Each validator looks at the words read from one slice and either accepts them
//! as a value for its field or returns None. They never fail and hold no state.

use regex::Regex;
use std::sync::LazyLock;

use super::vocab::{canonical_species, is_name_word, is_quirk, AGE_UNITS, GENDERLESS, GENDERS};

/// "12.5" in the two-word form "12.5 kg"; any number of fractional digits.
static WEIGHT_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("weight value pattern"));

/// "12.5kg" read as one word; exactly one fractional digit.
static WEIGHT_JOINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.[0-9])kg$").expect("joined weight pattern"));

/// The three values the gender line can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Genderless => GENDERLESS,
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            w if w == GENDERLESS => Some(Gender::Genderless),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An age candidate read from one slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgeReading {
    pub years: Option<u32>,
    pub months: Option<u32>,
}

impl AgeReading {
    /// How many distinct units the reading covers (1 or 2).
    pub fn unit_count(&self) -> usize {
        self.years.is_some() as usize + self.months.is_some() as usize
    }
}

/// Drops non-banner words and accepts the rest if they form a known species name.
///
/// Returns the canonical upper-case name.
pub fn validate_name(words: &[String]) -> Option<&'static str> {
    let kept: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| is_name_word(w))
        .collect();
    if kept.is_empty() {
        return None;
    }
    canonical_species(&kept.join(" "))
}

/// Accepts "<n> <unit> [<n> <unit>]" where every unit is year(s) or month(s).
///
/// A repeated unit overwrites the earlier value.
pub fn validate_age(words: &[String]) -> Option<AgeReading> {
    if words.is_empty() || words.len() % 2 != 0 {
        return None;
    }

    let mut reading = AgeReading::default();
    for pair in words.chunks_exact(2) {
        let (number, unit) = (&pair[0], pair[1].as_str());
        if !number.chars().all(|c| c.is_ascii_digit()) || !AGE_UNITS.contains(&unit) {
            return None;
        }
        let value: u32 = number.parse().ok()?;
        if unit.starts_with("year") {
            reading.years = Some(value);
        } else {
            reading.months = Some(value);
        }
    }
    Some(reading)
}

/// Accepts `["<d>.<d+>", "kg"]` or a single `"<d>.<d>kg"` word.
///
/// Whole numbers are rejected; the game always prints one decimal.
pub fn validate_weight(words: &[String]) -> Option<f64> {
    match words {
        [value, unit] if unit.eq_ignore_ascii_case("kg") && WEIGHT_VALUE.is_match(value) => {
            value.parse().ok()
        }
        [joined] => WEIGHT_JOINED
            .captures(joined)
            .and_then(|caps| caps[1].parse().ok()),
        _ => None,
    }
}

/// Keeps only gender words and accepts them if they spell exactly one gender.
pub fn validate_gender(words: &[String]) -> Option<Gender> {
    let joined: String = words
        .iter()
        .filter(|w| GENDERS.contains(&w.as_str()))
        .map(String::as_str)
        .collect();
    Gender::from_word(&joined)
}

/// Accepts the whole slice if it reads as a known quirk phrase.
pub fn validate_note(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let joined = words.join(" ");
    is_quirk(&joined).then_some(joined)
}
