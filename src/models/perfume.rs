use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;
use crate::services::notes::parse_note_field;

/// Raw note field as sent by the backend: either one comma-joined string or
/// an already split list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NoteInput {
    /// "Bergamot, Pink Pepper, Iso E Super"
    Joined(String),
    /// ["Bergamot", "Pink Pepper", "Iso E Super"]
    List(Vec<String>),
}

impl Default for NoteInput {
    fn default() -> Self {
        NoteInput::List(Vec::new())
    }
}

impl NoteInput {
    /// Maps an arbitrary JSON value onto a note input.
    ///
    /// Strings and arrays are accepted; non-string array elements are skipped
    /// and every other shape becomes an empty list.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => NoteInput::Joined(s),
            Value::Array(items) => NoteInput::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => NoteInput::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            NoteInput::Joined(s) => s.trim().is_empty(),
            NoteInput::List(items) => items.is_empty(),
        }
    }
}

impl<'de> Deserialize<'de> for NoteInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(NoteInput::from_value(Value::deserialize(deserializer)?))
    }
}

impl From<&str> for NoteInput {
    fn from(value: &str) -> Self {
        NoteInput::Joined(value.to_string())
    }
}

impl From<String> for NoteInput {
    fn from(value: String) -> Self {
        NoteInput::Joined(value)
    }
}

impl From<Vec<String>> for NoteInput {
    fn from(value: Vec<String>) -> Self {
        NoteInput::List(value)
    }
}

impl From<Vec<&str>> for NoteInput {
    fn from(value: Vec<&str>) -> Self {
        NoteInput::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Pre-split `notes.{top,middle,base}` object some payloads carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNoteTiers {
    #[serde(default)]
    pub top: Option<NoteInput>,
    #[serde(default)]
    pub middle: Option<NoteInput>,
    #[serde(default)]
    pub base: Option<NoteInput>,
}

/// Perfume record in the shape the backend returns it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPerfume {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: String,
    #[serde(default, alias = "topNotes")]
    pub top_notes: Option<NoteInput>,
    #[serde(default, alias = "middleNotes", alias = "heart_notes")]
    pub middle_notes: Option<NoteInput>,
    #[serde(default, alias = "baseNotes")]
    pub base_notes: Option<NoteInput>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub notes: Option<RawNoteTiers>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_integer")]
    pub year: Option<i64>,
}

impl RawPerfume {
    /// Picks the pre-split tier when present and non-empty, otherwise the raw
    /// comma-joined field
    fn tier<'a>(
        split: Option<&'a NoteInput>,
        joined: Option<&'a NoteInput>,
    ) -> Option<&'a NoteInput> {
        match split {
            Some(input) if !input.is_empty() => Some(input),
            _ => joined,
        }
    }
}

/// Display-ready scent pyramid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfumeNotes {
    pub top: Vec<String>,
    pub middle: Vec<String>,
    pub base: Vec<String>,
}

impl PerfumeNotes {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.middle.is_empty() && self.base.is_empty()
    }
}

/// Perfume with its notes normalized, as handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Perfume {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub notes: PerfumeNotes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl Perfume {
    /// Full note vocabulary: top, then middle, then base
    pub fn all_notes(&self) -> impl Iterator<Item = &String> {
        self.notes
            .top
            .iter()
            .chain(self.notes.middle.iter())
            .chain(self.notes.base.iter())
    }
}

impl From<RawPerfume> for Perfume {
    fn from(raw: RawPerfume) -> Self {
        let split = raw.notes.as_ref();

        let notes = PerfumeNotes {
            top: parse_note_field(RawPerfume::tier(
                split.and_then(|n| n.top.as_ref()),
                raw.top_notes.as_ref(),
            )),
            middle: parse_note_field(RawPerfume::tier(
                split.and_then(|n| n.middle.as_ref()),
                raw.middle_notes.as_ref(),
            )),
            base: parse_note_field(RawPerfume::tier(
                split.and_then(|n| n.base.as_ref()),
                raw.base_notes.as_ref(),
            )),
        };

        Perfume {
            id: raw.id,
            name: raw.name.trim().to_string(),
            brand: raw.brand.trim().to_string(),
            notes,
            image_url: raw.image_url,
            gender: raw.gender,
            year: raw.year,
        }
    }
}
