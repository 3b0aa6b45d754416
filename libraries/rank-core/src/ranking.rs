//! Elo rankings
//!
//! Every track starts at [`STARTING_RANKING`]. A "match" between two tracks
//! moves both rankings towards the observed result, by at most [`K`] points.
//! See <https://en.wikipedia.org/wiki/Elo_rating_system#Mathematical_details>.

use serde::{Deserialize, Serialize};

/// Ranking given to every newly created track
pub const STARTING_RANKING: f64 = 1000.0;

/// Maximum adjustment per match
pub const K: f64 = 32.0;

/// Result of comparing two tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl MatchOutcome {
    /// Scores for (first, second): 1 = win, 0.5 = draw, 0 = loss
    pub fn scores(self) -> (f64, f64) {
        match self {
            Self::FirstWins => (1.0, 0.0),
            Self::SecondWins => (0.0, 1.0),
            Self::Draw => (0.5, 0.5),
        }
    }
}

/// Probability that a player ranked `rank_self` beats one ranked `rank_opponent`
pub fn expected_score(rank_self: f64, rank_opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rank_opponent - rank_self) / 400.0))
}

/// New rankings for both tracks after a match
pub fn new_rankings(rank_a: f64, rank_b: f64, outcome: MatchOutcome) -> (f64, f64) {
    let (score_a, score_b) = outcome.scores();

    let new_a = rank_a + K * (score_a - expected_score(rank_a, rank_b));
    let new_b = rank_b + K * (score_b - expected_score(rank_b, rank_a));

    (new_a, new_b)
}
