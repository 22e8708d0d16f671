mod cache;
mod leaderboard;
mod log;

pub use cache::*;
pub use leaderboard::*;
pub use log::*;
