use serde::{Deserialize, Deserializer};

/// Primary key type shared by districts and blocks (BIGSERIAL columns)
pub type Id = i64;

/// Deserialize a field that distinguishes "absent" from "explicit null".
///
/// Used with `#[serde(default, deserialize_with = "present")]` on an
/// `Option<Option<T>>`: a missing key stays `None`, `null` becomes
/// `Some(None)` and a value becomes `Some(Some(v))`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Keep `incoming` only when it carries a usable value; empty strings and
/// missing values fall back to what is already stored.
pub fn truthy_or(incoming: Option<&str>, stored: &str) -> String {
    match incoming {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => stored.to_string(),
    }
}

/// Same fallback rule for integer references: zero counts as "not sent".
pub fn truthy_id_or(incoming: Option<Id>, stored: Id) -> Id {
    match incoming {
        Some(value) if value != 0 => value,
        _ => stored,
    }
}

/// Overwrite whenever the key was present in the request, even with null.
pub fn present_or<T: Clone>(incoming: &Option<Option<T>>, stored: &Option<T>) -> Option<T> {
    match incoming {
        Some(value) => value.clone(),
        None => stored.clone(),
    }
}

/// Parse a path segment into an [`Id`]. Anything that is not an integer
/// can never match a row, so callers treat `None` as not found.
pub fn parse_id(raw: &str) -> Option<Id> {
    raw.trim().parse().ok()
}
