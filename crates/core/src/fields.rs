//! Serde helpers for partial-update payloads.
//!
//! Request bodies distinguish a field that was left out (keep the stored
//! value) from a field explicitly set to `null` (clear the stored value).
//! Plain `Option<T>` collapses the two, so nullable columns use
//! `Option<Option<T>>` with [`nullable`].
//!
//! Integer fields accept any JSON number without a fractional part, so
//! `2.0` reads as `2`; see [`optional_integer`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Deserialize a present field into `Some(value)`, keeping `null` as
/// `Some(None)`. Pair with `#[serde(default)]` so an absent field is `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The value of `n` when it is a whole number that fits an `i64`.
pub fn integral(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Deserialize an optional integer, accepting whole-valued floats.
/// Pair with `#[serde(default)]`.
pub fn optional_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    integral(&number)
        .and_then(|n| T::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, got {number}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Deserialize an identifier written either as a JSON string or a number.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

/// Optional variant of [`id`]. Blank strings count as "no id".
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw
        .map(RawId::into_string)
        .filter(|id| !id.trim().is_empty()))
}
