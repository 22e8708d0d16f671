use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Leaderboard;

/// A stored snapshot together with the wall-clock time it was fetched.
///
/// Serialized as `{ "timestamp": <epoch-ms>, "leaderboard": <snapshot> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cached {
    pub timestamp: i64,
    pub leaderboard: Leaderboard,
}

impl Cached {
    pub fn new(fetched_at: DateTime<Utc>, leaderboard: Leaderboard) -> Self {
        Self {
            timestamp: fetched_at.timestamp_millis(),
            leaderboard,
        }
    }

    /// Milliseconds elapsed between the fetch and `now`, saturating at the `i64` bounds.
    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis().saturating_sub(self.timestamp)
    }

    /// A record stays fresh while its age is strictly below `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.age_ms(now) < ttl.num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_leaderboard() -> Leaderboard {
        Leaderboard {
            event: "2023".to_string(),
            owner_id: "1".to_string(),
            members: Default::default(),
        }
    }

    #[test]
    fn test_freshness_boundary() {
        let fetched = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let cached = Cached::new(fetched, empty_leaderboard());
        let ttl = TimeDelta::minutes(5);

        assert!(cached.is_fresh(fetched, ttl));
        assert!(cached.is_fresh(fetched + TimeDelta::seconds(299), ttl));
        assert!(!cached.is_fresh(fetched + TimeDelta::seconds(300), ttl));
        assert!(!cached.is_fresh(fetched + TimeDelta::seconds(301), ttl));
    }

    #[test]
    fn test_ancient_record_is_stale() {
        let cached: Cached = serde_json::from_str(
            r#"{
                "timestamp": -9223372036854775808,
                "leaderboard": { "event": "2023", "owner_id": "1", "members": {} }
            }"#,
        )
        .unwrap();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        assert_eq!(cached.age_ms(now), i64::MAX);
        assert!(!cached.is_fresh(now, TimeDelta::minutes(5)));
    }

    #[test]
    fn test_serialized_shape() {
        let fetched = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let cached = Cached::new(fetched, empty_leaderboard());
        let value = serde_json::to_value(&cached).unwrap();

        assert_eq!(value["timestamp"], 1_700_000_000_123_i64);
        assert_eq!(value["leaderboard"]["event"], "2023");
    }
}
