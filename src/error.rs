//! Error types for board construction, access, and persistence.

use std::io;

use crate::board::Cell;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors reported by board operations.
///
/// Every variant is recoverable and reported at the offending call; a failed
/// constructor or loader never leaves a half-built board behind.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
  /// Board dimensions must both be positive.
  #[error("invalid board dimensions {width}x{height}")]
  InvalidDimension { width: usize, height: usize },

  /// Cell access outside the board.
  #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
  OutOfRange {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
  },

  /// A replacement buffer does not match the board shape.
  #[error("buffer holds {found} cells, the board needs {expected}")]
  ShapeMismatch { expected: usize, found: usize },

  /// Serialized cell data does not match the declared dimensions.
  #[error("cell data holds {found} bytes, expected {expected}")]
  MalformedState { expected: usize, found: usize },

  /// A cell value whose byte pattern is not valid UTF-8 text.
  #[error("cell value {0} cannot be stored in the text encoding")]
  UnencodableCell(Cell),

  /// Unrecognized boundary-mode tag in a save state.
  #[error("unknown boundary mode {0:?}")]
  UnknownBoundaryMode(String),

  /// Pattern text with ragged rows or stray characters.
  #[error("pattern line {line}: {reason}")]
  MalformedPattern { line: usize, reason: String },

  /// A file extension neither the save-state nor the pattern loader handles.
  #[error("unsupported file extension {0:?}")]
  UnsupportedFormat(String),

  #[error("i/o error")]
  Io(#[from] io::Error),

  #[error("malformed save document")]
  Json(#[from] serde_json::Error),
}
