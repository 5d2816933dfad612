use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

fn deserialize_naive_date<'de, D>(d: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    NaiveDate::parse_from_str(&s[..s.len().min(10)], "%Y-%m-%d")
        .map_err(serde::de::Error::custom)
}

/// A single date-stamped volume observation. Immutable once validated and
/// appended, except for same-date merges which add to `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeEvent {
    #[serde(deserialize_with = "deserialize_naive_date")]
    pub date: NaiveDate,
    pub amount: i64,
}

/// A publication and its chronological series of volume events.
///
/// This is a read/write view handed in by the caller; the core never loads or
/// persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub events: Vec<VolumeEvent>,
}

impl Publication {
    /// Historical amounts in insertion (chronological) order.
    pub fn amounts(&self) -> Vec<i64> {
        self.events.iter().map(|e| e.amount).collect()
    }
}
