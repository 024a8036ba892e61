use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid rows do not match declared size")]
    InvalidGridShape,
    #[error("Grid letters must be A-Z, got {0:?}")]
    InvalidLetter(char),
    #[error("Stored leaderboard is not a list of scores")]
    CorruptLeaderboard,
}

pub type Result<T> = core::result::Result<T, GameError>;
