//! Note normalization
//!
//! Turns raw note fields into deduplicated, display-ready note names. Raw
//! strings are only ever split on commas: many canonical notes ("pink
//! pepper", "tonka bean") are several words long and must survive as a
//! single token.
use crate::models::NoteInput;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Multi-word notes that are a single ingredient
const COMPOUND_NOTE_NAMES: &[&str] = &[
    "ambrette seed",
    "bitter orange",
    "black currant",
    "black pepper",
    "black tea",
    "blood orange",
    "cashmere wood",
    "clary sage",
    "fig leaf",
    "green tea",
    "hedione hc",
    "iso e super",
    "lily of the valley",
    "orange blossom",
    "orris root",
    "pink grapefruit",
    "pink pepper",
    "red berries",
    "sea salt",
    "tobacco leaf",
    "tonka bean",
    "vanilla bean",
    "violet leaf",
    "white musk",
    "white tea",
    "ylang ylang",
];

/// Display strings the default title-case rule would get wrong.
/// Keys are normalized; each value normalizes back to its key.
const CAPITALIZATION_OVERRIDES: &[(&str, &str)] = &[
    ("iso e super", "Iso E Super"),
    ("hedione hc", "Hedione HC"),
    ("ylang-ylang", "Ylang-Ylang"),
    ("lily-of-the-valley", "Lily-of-the-Valley"),
    ("bois d'argent", "Bois d'Argent"),
    ("vanilla co2", "Vanilla CO2"),
    ("pink pepper co2", "Pink Pepper CO2"),
    ("mcintosh apple", "McIntosh Apple"),
    ("cis-3-hexenol", "cis-3-Hexenol"),
];

static COMPOUND_NOTES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| COMPOUND_NOTE_NAMES.iter().copied().collect());

static OVERRIDES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| CAPITALIZATION_OVERRIDES.iter().copied().collect());

/// Lower-cases, trims and collapses internal whitespace runs to one space
pub fn normalize_note(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats one note for display.
///
/// Override table first, then title-case on each space-separated word.
pub fn format_note(raw: &str) -> String {
    let normalized = normalize_note(raw);
    if normalized.is_empty() {
        return String::new();
    }

    if let Some(display) = OVERRIDES.get(normalized.as_str()) {
        return (*display).to_string();
    }

    normalized
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character only when it maps to a single char
/// ("ß" would become "SS" and stop round-tripping through `normalize_note`)
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let head = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };

    std::iter::once(head).chain(chars).collect()
}

/// Whether the note is a known multi-word ingredient
pub fn is_compound_note(note: &str) -> bool {
    COMPOUND_NOTES.contains(normalize_note(note).as_str())
}

/// Parses a raw note field into display-ready, deduplicated notes.
///
/// First occurrence wins and input order is kept. Absent or empty input
/// yields an empty list.
pub fn parse_note_field(input: Option<&NoteInput>) -> Vec<String> {
    let raw_notes: Vec<&str> = match input {
        None => return Vec::new(),
        Some(NoteInput::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect(),
        Some(NoteInput::List(items)) => items.iter().map(String::as_str).collect(),
    };

    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(raw_notes.len());

    for raw in raw_notes {
        let formatted = format_note(raw);
        if formatted.is_empty() {
            continue;
        }
        // Keyed on the formatted note so two spellings sharing an override
        // display string collapse into one
        if seen.insert(normalize_note(&formatted)) {
            notes.push(formatted);
        }
    }

    notes
}
