pub mod handle;
pub mod leaderboard;
pub mod roster;
pub mod vote;
