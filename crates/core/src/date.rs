//! Serde helpers for memory dates.
//!
//! Clients send either a plain calendar date (`2023-04-22`) or a full
//! RFC 3339 timestamp (`2023-04-22T00:00:00.000Z`). Both deserialize to a
//! [`MemoryDate`]; a timestamp keeps only its UTC calendar date.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::types::MemoryDate;

/// Parse a date string in either accepted shape.
pub fn parse_memory_date(raw: &str) -> Result<MemoryDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.naive_utc().date())
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD or an RFC 3339 timestamp"))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<MemoryDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_memory_date(&raw).map_err(serde::de::Error::custom)
}

/// Variant of [`deserialize`] for optional fields.
///
/// Use together with `#[serde(default)]` so a missing field stays `None`.
pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<MemoryDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_memory_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
