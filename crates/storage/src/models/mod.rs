mod score;

pub use score::{NewScore, ScoreAggregate, ScoreRecord, percent_of};
