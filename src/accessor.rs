use std::future::Future;

use chrono::TimeDelta;
use tracing::{debug, instrument};

use crate::clock::Clock;
use crate::error::{LogError, Result};
use crate::model::{Cached, Leaderboard};
use crate::page::PageLocation;
use crate::storage::Storage;

/// How long a stored snapshot is served before it is fetched again.
pub const CACHE_TTL: TimeDelta = TimeDelta::minutes(5);

/// Anything able to download a leaderboard snapshot by its site path.
pub trait LeaderboardSource {
    fn fetch_leaderboard(&self, path: &str)
        -> impl Future<Output = Result<Leaderboard>> + Send;
}

/// Return the snapshot for `page`, from `storage` when a record younger than
/// [`CACHE_TTL`] exists, otherwise from `source`.
///
/// A fresh download always replaces the stored record. Fetch failures and
/// undecodable records are returned as errors and leave storage untouched.
#[instrument(skip_all, fields(key = %page.resource_key()))]
pub async fn get_leaderboard<S, C, F>(
    page: &PageLocation,
    storage: &mut S,
    clock: &C,
    source: &F,
) -> Result<Leaderboard>
where
    S: Storage,
    C: Clock,
    F: LeaderboardSource,
{
    let now = clock.now();
    let key = page.resource_key();

    if let Some(item) = storage.get_item(&key)? {
        let cached: Cached = serde_json::from_str(&item).map_err(|e| LogError::Json {
            context: format!("cache entry {key}"),
            source: e,
        })?;
        let age_ms = cached.age_ms(now);
        if cached.is_fresh(now, CACHE_TTL) {
            debug!(age_ms, "using cached leaderboard");
            return Ok(cached.leaderboard);
        }
        debug!(age_ms, "cached leaderboard is stale");
    }

    let leaderboard = source.fetch_leaderboard(&key).await?;
    debug!(members = leaderboard.members.len(), "fetched leaderboard");

    let record = Cached::new(now, leaderboard);
    let value = serde_json::to_string(&record).map_err(|e| LogError::Json {
        context: format!("cache entry {key}"),
        source: e,
    })?;
    storage.set_item(&key, value)?;

    Ok(record.leaderboard)
}
