//! Tri-state field wrapper for partial updates.
//!
//! A PATCH body distinguishes three cases per attribute:
//!
//! | JSON            | [`Patch`]       |
//! |-----------------|-----------------|
//! | key absent      | `Unset`         |
//! | `"key": null`   | `Clear`         |
//! | `"key": value`  | `Set(value)`    |
//!
//! Fields must carry `#[serde(default)]` so that an absent key deserializes
//! to `Unset`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Patch::Clear)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Overwrite a required attribute. `Unset` and `Clear` leave it untouched;
    /// rejecting `Clear` on required attributes is the validator's job.
    pub fn apply(self, target: &mut T) {
        if let Patch::Set(v) = self {
            *target = v;
        }
    }

    /// Overwrite a nullable attribute. `Clear` nulls it.
    pub fn apply_optional(self, target: &mut Option<T>) {
        match self {
            Patch::Unset => {}
            Patch::Clear => *target = None,
            Patch::Set(v) => *target = Some(v),
        }
    }
}

impl Patch<String> {
    /// Treat a blank string the same as an absent key.
    pub fn non_blank(self) -> Self {
        match self {
            Patch::Set(s) if s.trim().is_empty() => Patch::Unset,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
