//! Serde helpers for partial updates.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some(..)`, keeping `null` as `Some(None)`
///
/// Combined with `#[serde(default)]`, an absent field stays `None`, which lets
/// update handlers tell "leave unchanged" apart from "clear".
pub fn deserialize_nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
