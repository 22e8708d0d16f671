use std::fmt::Display;

use chrono::TimeZone;
use tracing::{debug, instrument};

use crate::accessor::{get_leaderboard, LeaderboardSource};
use crate::builder::leaderboard_to_log;
use crate::clock::Clock;
use crate::error::{LogError, Result};
use crate::page::PageLocation;
use crate::render::{add_log_to_page, DomSink, RenderOptions};
use crate::storage::Storage;

/// Fetch (or reuse) the leaderboard behind `page`, turn it into a log and
/// append the log to `sink`.
///
/// Any failure aborts the whole run; nothing is appended in that case.
#[instrument(skip_all, fields(url = %page.url()))]
pub async fn run<S, C, F, Tz, D>(
    page: &PageLocation,
    storage: &mut S,
    clock: &C,
    source: &F,
    options: &RenderOptions<Tz>,
    sink: &mut D,
) -> Result<()>
where
    S: Storage,
    C: Clock,
    F: LeaderboardSource,
    Tz: TimeZone,
    Tz::Offset: Display,
    D: DomSink + ?Sized,
{
    if !page.is_private_leaderboard_view() {
        return Err(LogError::UnsupportedPage {
            url: page.url().to_string(),
        });
    }

    let leaderboard = get_leaderboard(page, storage, clock, source).await?;
    let log = leaderboard_to_log(&leaderboard);
    debug!(entries = log.entries.len(), "rendering log");
    add_log_to_page(&log, options, sink)
}
