use alloc::string::String;
use alloc::vec::Vec;
use serde::Serialize;

use crate::*;

/// Best final scores, highest first. Serializes as a bare JSON array such as `[999,200,50]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    scores: Vec<u32>,
    #[serde(skip)]
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_LEADERBOARD_SIZE)
    }
}

impl Leaderboard {
    pub const STORAGE_KEY: &'static str = "leaderboard";

    pub fn new(capacity: usize) -> Self {
        Self {
            scores: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Builds a board from stored scores, restoring order and the size limit.
    pub fn from_scores(scores: impl IntoIterator<Item = u32>, capacity: usize) -> Self {
        let mut board = Self::new(capacity);
        board.scores.extend(scores);
        board.normalize();
        board
    }

    pub fn from_json(json: &str, capacity: usize) -> Result<Self> {
        let scores: Vec<u32> =
            serde_json::from_str(json).map_err(|_| GameError::CorruptLeaderboard)?;
        Ok(Self::from_scores(scores, capacity))
    }

    /// Missing or unreadable data gives an empty board.
    pub fn load_or_default(json: Option<&str>, capacity: usize) -> Self {
        match json.map(|json| Self::from_json(json, capacity)) {
            Some(Ok(board)) => board,
            Some(Err(err)) => {
                log::warn!("discarding stored leaderboard: {}", err);
                Self::new(capacity)
            }
            None => Self::new(capacity),
        }
    }

    pub fn to_json(&self) -> String {
        // a list of integers always serializes
        serde_json::to_string(&self.scores).unwrap_or_else(|_| String::from("[]"))
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Records a final score. Returns its 1-based rank when it made the board, equal scores share a rank.
    pub fn push(&mut self, score: u32) -> Option<usize> {
        self.scores.push(score);
        self.normalize();
        let rank = self.scores.iter().filter(|&&kept| kept > score).count() + 1;
        (rank <= self.scores.len()).then_some(rank)
    }

    /// Changes the size limit, dropping scores that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_top_three_descending() {
        let mut board = Leaderboard::new(3);
        for score in [50, 200, 10, 999] {
            board.push(score);
        }

        let reloaded = Leaderboard::from_json(&board.to_json(), 3).unwrap();

        assert_eq!(reloaded.scores(), &[999, 200, 50]);
        assert_eq!(board.to_json(), "[999,200,50]");
    }

    #[test]
    fn keeps_top_five_when_configured() {
        let mut board = Leaderboard::new(5);
        for score in [50, 200, 10, 999, 7, 300] {
            board.push(score);
        }

        assert_eq!(board.scores(), &[999, 300, 200, 50, 10]);
    }

    #[test]
    fn push_reports_rank_only_when_kept() {
        let mut board = Leaderboard::from_scores([300, 200, 100], 3);

        assert_eq!(board.push(250), Some(2));
        assert_eq!(board.push(5), None);
        assert_eq!(board.push(300), Some(1));
    }

    #[test]
    fn corrupt_or_missing_data_loads_empty() {
        assert!(Leaderboard::load_or_default(None, 3).is_empty());
        assert!(Leaderboard::load_or_default(Some("{oops"), 3).is_empty());
        assert!(Leaderboard::load_or_default(Some("[\"a\"]"), 3).is_empty());
        assert_eq!(
            Leaderboard::from_json("null", 3),
            Err(GameError::CorruptLeaderboard)
        );
    }

    #[test]
    fn stored_data_is_resorted_and_truncated() {
        let board = Leaderboard::load_or_default(Some("[1,5,3,4]"), 3);

        assert_eq!(board.scores(), &[5, 4, 3]);
    }
}
