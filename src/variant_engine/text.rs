//! Serde helpers that normalize the loosely-typed fields of a test definition.
//!
//! Text in a definition may be written as a single string or as an array of
//! lines, collections may be `null` or missing, and word banks may contain
//! cross-reference entries. Everything is normalized on load so the engine
//! never sees an absent collection.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

pub const ZERO_WIDTH_SPACE: &str = "\u{200b}";

/// Definitions of the form `See <word>.` point at another entry and are not
/// real definitions.
static CROSS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^See[\s\w]+\.").expect("cross-reference pattern is valid")
});

#[derive(Deserialize)]
#[serde(untagged)]
enum Lines {
    One(String),
    Many(Vec<String>),
}

impl Lines {
    fn join(self) -> String {
        let joined = match self {
            Lines::One(s) => s,
            Lines::Many(lines) => lines.join("\n"),
        };
        strip_zero_width(&joined)
    }
}

pub fn strip_zero_width(s: &str) -> String {
    s.replace(ZERO_WIDTH_SPACE, "")
}

/// True when a word-bank definition is only a pointer to another entry.
pub fn is_cross_reference(definition: &str) -> bool {
    CROSS_REFERENCE.is_match(definition)
}

/// A string, or an array of lines joined with `\n`. `null` becomes empty.
pub fn lines<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<Lines>::deserialize(d)?.map(Lines::join).unwrap_or_default())
}

/// Any list; `null` becomes empty.
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// A list of multi-line fragments (sub-question parts).
pub fn parts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<Lines>>::deserialize(d)?
        .unwrap_or_default()
        .into_iter()
        .map(Lines::join)
        .collect())
}

/// Word → definition map with zero-width spaces removed and cross-reference
/// entries dropped.
pub fn word_bank<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let raw = Option::<BTreeMap<String, String>>::deserialize(d)?.unwrap_or_default();
    Ok(normalize_word_bank(raw))
}

pub fn normalize_word_bank(raw: BTreeMap<String, String>) -> BTreeMap<String, String> {
    raw.into_iter()
        .filter(|(_, def)| !is_cross_reference(def))
        .map(|(word, def)| (strip_zero_width(&word), strip_zero_width(&def)))
        .collect()
}
