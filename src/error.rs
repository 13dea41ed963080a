//! Error types shared by configuration loading and game-state handling.
//!
//! The decision engine itself never fails: a full board yields `None`.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::Pos;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid difficulty '{0}' (expected perfect, medium, easy, error:<p> or shallow:<d>)")]
    InvalidDifficulty(String),

    #[error("error rate {0} is out of range (0..=100)")]
    ErrorRateOutOfRange(u8),

    #[error("depth limit {0} is out of range (1..=9)")]
    DepthOutOfRange(u8),

    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("position {0} is outside the board")]
    OutOfBounds(Pos),

    #[error("cell {0} is already occupied")]
    CellOccupied(Pos),

    #[error("game is already over")]
    GameOver,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("AI is thinking")]
    AiThinking,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::CellOccupied(Pos::new(1, 2)).to_string(), "cell (1, 2) is already occupied");
        assert_eq!(Error::DepthOutOfRange(0).to_string(), "depth limit 0 is out of range (1..=9)");
        assert!(Error::InvalidDifficulty("insane".into()).to_string().contains("'insane'"));
    }

    #[test]
    fn test_toml_error_converts() {
        let err: Error = toml::from_str::<toml::Value>("difficulty = ").unwrap_err().into();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
