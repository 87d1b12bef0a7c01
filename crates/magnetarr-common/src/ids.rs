//! Helpers for external catalog identifiers.
//!
//! Catalogs disagree on how they encode ids: TVDB v4 returns numbers in some
//! endpoints and strings in others, TMDB returns numbers, and the backends use
//! numbers for `tvdbId`. Everything is normalized to `String` at the edges.

use serde::{Deserialize, Deserializer};

/// Returns `true` when `value` looks like an IMDB title id (`tt` + 7 or 8 digits).
pub fn is_imdb_id(value: &str) -> bool {
    let Some(digits) = value.strip_prefix("tt") else {
        return false;
    };
    (7..=8).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawId {
    fn into_string(self) -> Option<String> {
        match self {
            RawId::Text(s) if s.trim().is_empty() => None,
            RawId::Text(s) => Some(s.trim().to_string()),
            RawId::Int(n) => Some(n.to_string()),
            RawId::Float(f) if f.fract() == 0.0 => Some((f as i64).to_string()),
            RawId::Float(f) => Some(f.to_string()),
        }
    }
}

/// Deserialize an id encoded as a JSON string or number into a `String`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?
        .into_string()
        .ok_or_else(|| serde::de::Error::custom("empty identifier"))
}

/// Like [`string_or_number`] but maps `null`, missing and empty values to `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.and_then(RawId::into_string))
}
