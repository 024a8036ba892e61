#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use controller::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use leaderboard::*;
pub use selection::*;
pub use timer::*;
pub use types::*;
pub use validation::*;

mod controller;
mod error;
mod generator;
mod grid;
mod leaderboard;
mod selection;
mod timer;
mod types;
mod validation;

/// When the grid receives a fresh set of letters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReshufflePolicy {
    /// Only once, when the game is loaded.
    #[default]
    OnLoad,
    /// At load and again at the start of every round.
    EveryRound,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub round_secs: u32,
    pub min_word_len: usize,
    pub debounce_ms: u32,
    pub points_per_letter: u32,
    pub leaderboard_size: usize,
    pub reshuffle: ReshufflePolicy,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (5, 5);
    pub const DEFAULT_ROUND_SECS: u32 = 60;
    pub const DEFAULT_MIN_WORD_LEN: usize = 3;
    pub const DEFAULT_DEBOUNCE_MS: u32 = 300;
    pub const DEFAULT_POINTS_PER_LETTER: u32 = 100;
    pub const DEFAULT_LEADERBOARD_SIZE: usize = 3;

    const MAX_LEADERBOARD_SIZE: usize = 100;

    /// Builds a config with the default timings, clamping `size` and `leaderboard_size` into a usable range.
    pub fn new((size_x, size_y): Coord2, leaderboard_size: usize, reshuffle: ReshufflePolicy) -> Self {
        Self {
            size: (size_x.clamp(1, Coord::MAX), size_y.clamp(1, Coord::MAX)),
            leaderboard_size: leaderboard_size.clamp(1, Self::MAX_LEADERBOARD_SIZE),
            reshuffle,
            ..Self::default()
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Points awarded for a valid word of `len` letters.
    pub fn word_points(&self, len: usize) -> u32 {
        u32::try_from(len)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.points_per_letter)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            round_secs: Self::DEFAULT_ROUND_SECS,
            min_word_len: Self::DEFAULT_MIN_WORD_LEN,
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            points_per_letter: Self::DEFAULT_POINTS_PER_LETTER,
            leaderboard_size: Self::DEFAULT_LEADERBOARD_SIZE,
            reshuffle: ReshufflePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_degenerate_values() {
        let config = GameConfig::new((0, 7), 0, ReshufflePolicy::EveryRound);

        assert_eq!(config.size, (1, 7));
        assert_eq!(config.leaderboard_size, 1);
        assert_eq!(config.round_secs, 60);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn five_letter_word_is_worth_five_hundred() {
        assert_eq!(GameConfig::default().word_points(5), 500);
    }
}
