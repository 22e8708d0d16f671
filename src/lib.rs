pub use accessor::{get_leaderboard, LeaderboardSource, CACHE_TTL};
pub use builder::leaderboard_to_log;
pub use client::AocClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{LogError, Result};
pub use model::*;
pub use page::PageLocation;
pub use pipeline::run;
pub use render::{add_log_to_page, build_fragment, DomSink, HtmlPage, RenderOptions};
pub use storage::{FileStorage, MemoryStorage, Storage};

pub mod accessor;
pub mod builder;
pub mod client;
pub mod clock;
pub mod dom;
pub mod error;
pub mod model;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
