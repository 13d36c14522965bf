pub mod leaderboard;
pub mod scores;
