//! Lenient deserializers for query string values.
//!
//! Form-encoded clients routinely send `?key=` for "no value"; these
//! helpers read an empty value as absent instead of failing the request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Parse an optional value with [`FromStr`]; empty or blank means absent.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Accepts `true`/`false` in any case (plus `1`/`0`); empty means absent.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Some(true)),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Some(false)),
        Some(v) => Err(serde::de::Error::custom(format!(
            "invalid boolean value: {v}"
        ))),
    }
}
