//! Section validators for MARLEY run configurations.
//!
//! Each validator inspects one section of the parsed document and reports
//! independently, so a broken `target` does not hide problems in `source`.
//! Sections that are absent are skipped here; [`structure`] reports them.

pub mod direction;
pub mod reactions;
pub mod seed;
pub mod source;
pub mod structure;
pub mod target;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes one top-level section, if present.
///
/// `None` means the section is absent; `Some(Err(_))` carries the decoder
/// message.
fn decode_section<T: DeserializeOwned>(document: &Value, key: &str) -> Option<Result<T, String>> {
    let value = document.get(key)?;
    Some(T::deserialize(value).map_err(|e| e.to_string()))
}
