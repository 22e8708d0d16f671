use std::collections::BTreeMap;

use crate::model::{CompletionDayLevel, GetStar, Leaderboard, Member, Part};

/// A member holding the given `(day, part, epoch seconds)` stars.
pub(crate) fn member(id: &str, name: Option<&str>, stars: &[(u32, Part, i64)]) -> Member {
    let mut completion_day_level: BTreeMap<u32, CompletionDayLevel> = BTreeMap::new();
    for &(day, part, ts) in stars {
        let level = completion_day_level.entry(day).or_default();
        let star = Some(GetStar {
            get_star_ts: ts.to_string(),
            star_index: None,
        });
        match part {
            Part::One => level.part1 = star,
            Part::Two => level.part2 = star,
        }
    }

    Member {
        id: id.to_string(),
        name: name.map(str::to_string),
        global_score: 0,
        local_score: 0,
        stars: stars.len() as u32,
        last_star_ts: stars
            .iter()
            .map(|&(_, _, ts)| ts)
            .max()
            .unwrap_or_default()
            .to_string(),
        completion_day_level,
    }
}

pub(crate) fn leaderboard(event: &str, members: Vec<Member>) -> Leaderboard {
    Leaderboard {
        event: event.to_string(),
        owner_id: members
            .first()
            .map(|m| m.id.clone())
            .unwrap_or_default(),
        members: members.into_iter().map(|m| (m.id.clone(), m)).collect(),
    }
}
