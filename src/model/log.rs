use chrono::{DateTime, Utc};

use crate::model::Member;

/// Which half of a day's puzzle a star was awarded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::EnumIter)]
pub enum Part {
    One = 1,
    Two = 2,
}

/// A leaderboard flattened into scoring events, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct Log<'a> {
    pub event: &'a str,
    pub entries: Vec<LogEntry<'a>>,
}

/// One star awarded to one member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry<'a> {
    pub timestamp: DateTime<Utc>,
    pub member: &'a Member,
    pub day: u32,
    pub part: Part,
}
