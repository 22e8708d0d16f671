use std::cmp::Reverse;

use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::model::{Leaderboard, Log, LogEntry, Member, Part};

/// Flatten every star on the leaderboard into a log, most recent first.
///
/// Entries with equal timestamps keep traversal order: members by ascending
/// numeric id, days ascending, part one before part two. Stars whose
/// timestamp does not parse are left out.
pub fn leaderboard_to_log(leaderboard: &Leaderboard) -> Log<'_> {
    let entries: Vec<LogEntry> = leaderboard
        .members
        .values()
        .sorted_by(|a, b| member_order(a).cmp(&member_order(b)))
        .flat_map(member_entries)
        .sorted_by_key(|entry| Reverse(entry.timestamp))
        .collect();

    debug!(
        event = %leaderboard.event,
        count = entries.len(),
        "built leaderboard log"
    );

    Log {
        event: &leaderboard.event,
        entries,
    }
}

fn member_entries(member: &Member) -> impl Iterator<Item = LogEntry<'_>> {
    member
        .completion_day_level
        .iter()
        .flat_map(move |(&day, level)| {
            Part::iter().filter_map(move |part| {
                let timestamp = level.star(part)?.completed_at()?;
                Some(LogEntry {
                    timestamp,
                    member,
                    day,
                    part,
                })
            })
        })
}

/// Numeric ids first in numeric order, anything else afterwards by string.
fn member_order(member: &Member) -> (bool, Option<u64>, &str) {
    let numeric = member.id.parse::<u64>().ok();
    (numeric.is_none(), numeric, &member.id)
}
