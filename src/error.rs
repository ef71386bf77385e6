//! Error types for catalog validation and anchor selection.

use thiserror::Error;

/// Result type for edgematch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before a search starts.
///
/// A search itself never fails: dead ends and anchors without solutions are
/// ordinary outcomes, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A shape value outside ±1..=±4.
    #[error("invalid shape {0}: expected one of ±1, ±2, ±3, ±4")]
    InvalidShape(i8),

    /// The catalog does not hold one piece per grid cell.
    #[error("catalog has {actual} pieces, expected {expected}")]
    WrongPieceCount { expected: usize, actual: usize },

    /// A piece whose id does not match its catalog position.
    #[error("piece at position {position} has id {id}")]
    MisnumberedPiece { position: usize, id: u8 },

    /// An anchor naming a piece or rotation that does not exist.
    #[error("invalid anchor: piece {piece_id}, rotation {rotation}")]
    InvalidAnchor { piece_id: u8, rotation: u8 },

    /// The worker pool for a parallel sweep could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(err.to_string())
    }
}
