//! Static vocabularies for the conservation info-card.
//!
//! Everything here is read-only and shared between worker threads.

/// Normalized vertical placement of the info-box for one species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryHint {
    /// Top edge of the info-box as a fraction of screenshot height
    pub top_offset: f64,
    /// Info-box height as a fraction of screenshot height
    pub height: f64,
}

impl GeometryHint {
    const fn new(top_offset: f64, height: f64) -> Self {
        Self { top_offset, height }
    }
}

/// Wide window used when the species could not be identified.
pub const DEFAULT_GEOMETRY: GeometryHint = GeometryHint::new(0.52, 0.31);

/// Info-box geometry keyed by the exact (upper-case) display name.
///
/// Doubles as the whitelist of full species names.
pub const SPECIES_GEOMETRY: [(&str, GeometryHint); 54] = [
    ("BURROWING CRYPTILEX", GeometryHint::new(0.65, 0.13)),
    ("SEPTIC CRYPTILEX", GeometryHint::new(0.68, 0.13)),
    ("CAUSTIC CRYPTILEX", GeometryHint::new(0.64, 0.14)),
    ("COMMON AVICHAEA", GeometryHint::new(0.67, 0.14)),
    ("SPORULE AVICHAEA", GeometryHint::new(0.57, 0.14)),
    ("VISCID AVICHAEA", GeometryHint::new(0.57, 0.14)),
    ("AMETHYST NEXIFERA", GeometryHint::new(0.64, 0.14)),
    ("SCARLET NEXIFERA", GeometryHint::new(0.65, 0.14)),
    ("VIRIDIAN NEXIFERA", GeometryHint::new(0.65, 0.14)),
    ("VIZIER PREDASITE", GeometryHint::new(0.65, 0.13)),
    ("PHARAOH PREDASITE", GeometryHint::new(0.57, 0.14)),
    ("MEDJAY PREDASITE", GeometryHint::new(0.57, 0.14)),
    ("SLY VULPAPHYLA", GeometryHint::new(0.65, 0.14)),
    ("CRESCENT VULPAPHYLA", GeometryHint::new(0.55, 0.13)),
    ("PANZER VULPAPHYLA", GeometryHint::new(0.57, 0.14)),
    ("UMBER UNDAZOA", GeometryHint::new(0.65, 0.14)),
    ("HOWLER UNDAZOA", GeometryHint::new(0.55, 0.14)),
    ("VAPOROUS UNDAZOA", GeometryHint::new(0.57, 0.14)),
    ("GREEN VELOCIPOD", GeometryHint::new(0.67, 0.12)),
    ("PURPLE VELOCIPOD", GeometryHint::new(0.67, 0.12)),
    ("WHITE VELOCIPOD", GeometryHint::new(0.70, 0.10)),
    ("PLAINS KUAKA", GeometryHint::new(0.67, 0.14)),
    ("ASHEN KUAKA", GeometryHint::new(0.67, 0.14)),
    ("GHOST KUAKA", GeometryHint::new(0.67, 0.14)),
    ("COMMON CONDROC", GeometryHint::new(0.57, 0.14)),
    ("ROGUE CONDROC", GeometryHint::new(0.57, 0.14)),
    ("EMPEROR CONDROC", GeometryHint::new(0.57, 0.14)),
    ("COASTAL MERGOO", GeometryHint::new(0.52, 0.14)),
    ("WOODLAND MERGOO", GeometryHint::new(0.52, 0.14)),
    ("SPLENDID MERGOO", GeometryHint::new(0.52, 0.14)),
    ("OSTIA VASCA KAVAT", GeometryHint::new(0.44, 0.14)),
    ("BAU VASCA KAVAT", GeometryHint::new(0.44, 0.14)),
    ("NEPHIL VASCA KAVAT", GeometryHint::new(0.44, 0.14)),
    ("SUNNY POBBER", GeometryHint::new(0.54, 0.14)),
    ("DELICATE POBBER", GeometryHint::new(0.54, 0.14)),
    ("SUBTERRANEAN POBBER", GeometryHint::new(0.54, 0.14)),
    ("WHITE-BREASTED VIRMINK", GeometryHint::new(0.57, 0.14)),
    ("DUSKY-HEADED VIRMINK", GeometryHint::new(0.57, 0.14)),
    ("RED-CRESTED VIRMINK", GeometryHint::new(0.57, 0.14)),
    ("FLOSSY SAWGAW", GeometryHint::new(0.62, 0.14)),
    ("ALPINE MONITOR SAWGAW", GeometryHint::new(0.62, 0.14)),
    ("FROGMOUTHED SAWGAW", GeometryHint::new(0.62, 0.14)),
    ("SPOTTED BOLAROLA", GeometryHint::new(0.52, 0.31)),
    ("BLACK-BANDED BOLAROLA", GeometryHint::new(0.52, 0.31)),
    ("THORNY BOLAROLA", GeometryHint::new(0.52, 0.31)),
    ("DAPPLED HORRASQUE", GeometryHint::new(0.55, 0.13)),
    ("SWIMMER HORRASQUE", GeometryHint::new(0.55, 0.13)),
    ("HORRASQUE STORMER", GeometryHint::new(0.55, 0.13)),
    ("SENTINEL STOVER", GeometryHint::new(0.62, 0.14)),
    ("FUMING DAX STOVER", GeometryHint::new(0.62, 0.14)),
    ("FIRE-VEINED STOVER", GeometryHint::new(0.62, 0.14)),
    ("BRINDLE KUBRODON", GeometryHint::new(0.57, 0.14)),
    ("VALLIS KUBRODON", GeometryHint::new(0.57, 0.14)),
    ("KUBRODON INCARNADINE", GeometryHint::new(0.57, 0.14)),
];

/// Single words that may appear in a species banner. Anything else read from the
/// banner is OCR noise.
pub const NAME_WORDS: [&str; 74] = [
    "CRYPTILEX", "AVICHAEA", "NEXIFERA", "PREDASITE", "VULPAPHYLA", "VELOCIPOD", "UNDAZOA",
    "KUAKA", "CONDROC", "MERGOO", "VASCA", "KAVAT", "POBBER", "VIRMINK", "SAWGAW", "BOLAROLA",
    "HORRASQUE", "STOVER", "KUBRODON",
    "BURROWING", "SEPTIC", "CAUSTIC",
    "COMMON", "SPORULE", "VISCID",
    "AMETHYST", "SCARLET", "VIRIDIAN",
    "VIZIER", "PHARAOH", "MEDJAY",
    "SLY", "CRESCENT", "PANZER",
    "UMBER", "HOWLER", "VAPOROUS",
    "GREEN", "PURPLE", "WHITE",
    "PLAINS", "ASHEN", "GHOST",
    "ROGUE", "EMPEROR",
    "COASTAL", "WOODLAND", "SPLENDID",
    "OSTIA", "BAU", "NEPHIL",
    "SUNNY", "DELICATE", "SUBTERRANEAN",
    "WHITE-BREASTED", "DUSKY-HEADED", "RED-CRESTED",
    "FLOSSY", "ALPINE", "MONITOR", "FROGMOUTHED",
    "SPOTTED", "BLACK-BANDED", "THORNY",
    "DAPPLED", "SWIMMER", "STORMER",
    "SENTINEL", "FUMING", "DAX", "FIRE-VEINED",
    "BRINDLE", "VALLIS", "INCARNADINE",
];

/// Species whose cards show no gender line.
pub const NO_GENDER_SPECIES: [&str; 6] = [
    "GREEN VELOCIPOD",
    "PURPLE VELOCIPOD",
    "WHITE VELOCIPOD",
    "BURROWING CRYPTILEX",
    "SEPTIC CRYPTILEX",
    "CAUSTIC CRYPTILEX",
];

/// Species whose cards show no quirk line.
pub const NO_QUIRK_SPECIES: [&str; 3] = ["GREEN VELOCIPOD", "PURPLE VELOCIPOD", "WHITE VELOCIPOD"];

pub const GENDERS: [&str; 3] = ["Male", "Female", "Genderless"];

/// Value recorded for species without a gender line.
pub const GENDERLESS: &str = "Genderless";

/// Value recorded for species without a quirk line.
pub const NO_QUIRK: &str = "No Quirk";

pub const AGE_UNITS: [&str; 4] = ["year", "years", "month", "months"];

/// Known quirk phrases, lower case.
pub const QUIRKS: [&str; 105] = [
    "abnormal swelling", "acute hearing", "afraid of heights", "afraid of water", "alert",
    "always hiding", "bad breath", "big eyes", "binge-eater", "bites nails",
    "burrows under blankets", "calm", "can open closets", "chest infection", "chews wires",
    "chirps", "collects flowers", "constipated", "cracked footpads", "cracked tooth",
    "damaged beak", "defensive", "digger", "dirty", "discolored teeth", "double-jointed",
    "dry skin", "dull, waxy feathers", "easily startled", "enlarged genitals",
    "excessive grooming", "fever", "fleas", "freezes when panicked", "fussy eater", "grouchy",
    "healthy and happy", "highly aggressive", "in heat", "intestinal parasites", "irritable",
    "itchy", "joint stiffness", "lesions", "lethargic", "likes being carried",
    "likes open space", "likes people", "lively", "lolling tongue", "loves water", "mange",
    "muscular", "occasional discharge", "odd", "overweight", "physically undeveloped",
    "playful", "pleasant smelling", "poor vision", "prefers confined spaces",
    "prefers high places", "pronounced limp", "protective", "purrs", "recognizes faces",
    "redness", "rheumy eyes", "runs in circles", "scavenges relentlessly",
    "scratches the ground", "shivers inexplicably", "sings", "smelly", "snarls", "sneaky",
    "starving", "strange habits", "territorial", "torn ear", "twitchy", "underweight",
    "whistles", "drools", "keen smell", "binge eater", "preens", "ear infection",
    "loves heights", "undeveloped teeth", "clean", "old injuries", "molting", "shiny feathers",
    "bites claws", "mites", "healthy", "cracked claws", "tremors", "pecks things", "waxy ears",
    "licks things", "cracked teeth", "misaligned beak", "highly active",
];

/// Two-word names where the first word is the species, e.g. "HORRASQUE STORMER".
pub const SPECIES_FIRST: [&str; 2] = ["HORRASQUE", "KUBRODON"];

/// Trailing word marking a two-word species compound ("VASCA KAVAT").
pub const COMPOUND_SPECIES_MARKERS: [&str; 1] = ["KAVAT"];

/// Trailing word that is the species itself in a three-word name ("ALPINE MONITOR SAWGAW").
pub const TRAILING_SPECIES_MARKERS: [&str; 2] = ["STOVER", "SAWGAW"];

/// Info-box geometry for a known species, or the wide default.
pub fn geometry_for(name: Option<&str>) -> GeometryHint {
    name.and_then(|n| {
        SPECIES_GEOMETRY
            .iter()
            .find(|(species, _)| *species == n)
            .map(|(_, hint)| *hint)
    })
    .unwrap_or(DEFAULT_GEOMETRY)
}

/// Case-insensitive lookup in the full species list; returns the canonical name.
pub fn canonical_species(candidate: &str) -> Option<&'static str> {
    SPECIES_GEOMETRY
        .iter()
        .map(|(species, _)| *species)
        .find(|species| species.eq_ignore_ascii_case(candidate))
}

pub fn is_name_word(word: &str) -> bool {
    let upper = word.to_uppercase();
    NAME_WORDS.contains(&upper.as_str())
}

pub fn is_quirk(phrase: &str) -> bool {
    QUIRKS.contains(&phrase.to_lowercase().as_str())
}

pub fn has_no_gender(name: Option<&str>) -> bool {
    name.is_some_and(|n| NO_GENDER_SPECIES.contains(&n))
}

pub fn has_no_quirk(name: Option<&str>) -> bool {
    name.is_some_and(|n| NO_QUIRK_SPECIES.contains(&n))
}
