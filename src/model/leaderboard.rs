use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::Part;

/// A point-in-time view of one private leaderboard, as served by `<page>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(deserialize_with = "string_or_number")]
    pub event: String,
    #[serde(deserialize_with = "string_or_number")]
    pub owner_id: String,
    pub members: BTreeMap<String, Member>,
}

/// A participant and every star they have collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub global_score: i64,
    #[serde(default)]
    pub local_score: i64,
    #[serde(default)]
    pub stars: u32,
    /// `"0"` when the member has no stars yet.
    #[serde(
        default,
        alias = "last_start_ts",
        deserialize_with = "string_or_number"
    )]
    pub last_star_ts: String,
    #[serde(default)]
    pub completion_day_level: BTreeMap<u32, CompletionDayLevel>,
}

impl Member {
    /// The member's name, or a placeholder naming their id for anonymous users.
    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("(anonymous user #{})", self.id)),
        }
    }
}

/// The stars a member has for a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionDayLevel {
    #[serde(rename = "1", default, skip_serializing_if = "Option::is_none")]
    pub part1: Option<GetStar>,
    #[serde(rename = "2", default, skip_serializing_if = "Option::is_none")]
    pub part2: Option<GetStar>,
}

impl CompletionDayLevel {
    /// The star record for `part`, if that part is done.
    pub fn star(&self, part: Part) -> Option<&GetStar> {
        match part {
            Part::One => self.part1.as_ref(),
            Part::Two => self.part2.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStar {
    /// Seconds since the Unix epoch.
    #[serde(deserialize_with = "string_or_number")]
    pub get_star_ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_index: Option<u64>,
}

impl GetStar {
    /// Completion time, or `None` if the timestamp is not a valid epoch second.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.get_star_ts
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Older seasons encode ids and timestamps as strings, newer ones as numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
