//! Save-state persistence.
//!
//! The on-disk document is JSON with the board and both masks flattened
//! row-major and stored as raw little-endian 64-bit integers reinterpreted as
//! UTF-8 text. That reinterpretation is a known fragility inherited from the
//! format: only cell values whose byte patterns happen to be valid UTF-8
//! survive the trip. The values 0 and 1 do, which is all a well-formed board
//! ever stores.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Cell, Topology};
use crate::error::{BoardError, Result};

/// The serialized form of a board, masks included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
  pub board_width: usize,
  pub board_height: usize,
  pub in_box: BoundaryTag,
  pub board: String,
  pub mask_life: String,
  pub mask_dead: String,
}

/// Boundary mode as it appears on disk.
///
/// Writing always produces the boolean form (`true` = bounded box). Reading
/// additionally accepts the mode spelled out, so a hand-edited document fails
/// with a named tag error instead of a bare type mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundaryTag {
  Flag(bool),
  Name(String),
}

impl BoundaryTag {
  fn topology(&self) -> Result<Topology> {
    match self {
      BoundaryTag::Flag(true) => Ok(Topology::Bounded),
      BoundaryTag::Flag(false) => Ok(Topology::Toroidal),
      BoundaryTag::Name(name) => match name.as_str() {
        "bounded" => Ok(Topology::Bounded),
        "toroidal" => Ok(Topology::Toroidal),
        _ => Err(BoardError::UnknownBoundaryMode(name.clone())),
      },
    }
  }
}

impl From<Topology> for BoundaryTag {
  fn from(topology: Topology) -> Self {
    BoundaryTag::Flag(topology == Topology::Bounded)
  }
}

fn encode(cells: &[Cell]) -> Result<String> {
  let mut bytes = Vec::with_capacity(cells.len() * 8);
  for &cell in cells {
    bytes.extend_from_slice(&cell.to_le_bytes());
  }
  String::from_utf8(bytes).map_err(|err| {
    let at = err.utf8_error().valid_up_to() / 8;
    BoardError::UnencodableCell(cells[at])
  })
}

fn decode(text: &str, expected_cells: usize) -> Result<Vec<Cell>> {
  let bytes = text.as_bytes();
  if bytes.len() != expected_cells * 8 {
    return Err(BoardError::MalformedState {
      expected: expected_cells * 8,
      found: bytes.len(),
    });
  }
  Ok(
    bytes
      .chunks_exact(8)
      .map(|chunk| {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        Cell::from_le_bytes(raw)
      })
      .collect(),
  )
}

impl Board {
  /// Snapshot of the full simulation state.
  pub fn save_state(&self) -> Result<SaveState> {
    Ok(SaveState {
      board_width: self.width(),
      board_height: self.height(),
      in_box: self.topology().into(),
      board: encode(self.cells())?,
      mask_life: encode(self.life_mask())?,
      mask_dead: encode(self.dead_mask())?,
    })
  }

  /// Reconstructs a fresh board from a snapshot.
  ///
  /// The snapshot is validated up front; no half-built board escapes. The
  /// document carries no rule field, so the restored board runs B3/S23.
  pub fn restore(state: &SaveState) -> Result<Self> {
    if state.board_width == 0 || state.board_height == 0 {
      return Err(BoardError::InvalidDimension {
        width: state.board_width,
        height: state.board_height,
      });
    }
    let topology = state.in_box.topology()?;
    let size = state.board_width * state.board_height;

    Self::from_parts(
      state.board_width,
      state.board_height,
      topology,
      decode(&state.board, size)?,
      decode(&state.mask_life, size)?,
      decode(&state.mask_dead, size)?,
    )
  }

  /// The save state as an indented JSON document.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(&self.save_state()?)?)
  }

  /// Parses a JSON save document into a fresh board.
  pub fn from_json(src: &str) -> Result<Self> {
    let state: SaveState = serde_json::from_str(src)?;
    Self::restore(&state)
  }

  /// Writes the save document to `path`.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, self.to_json()?)?;
    debug!(path = %path.display(), "state saved");
    Ok(())
  }

  /// Loads a board from a file, dispatching on the extension alone:
  /// `.json` is a save document, `.cells` a pattern (bounded topology, the
  /// pattern format carries none). Anything else is refused.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
      "json" => {
        let board = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), "state loaded");
        Ok(board)
      }
      "cells" => {
        let board = crate::cells::read(fs::read_to_string(path)?, Topology::Bounded)?;
        debug!(path = %path.display(), "pattern loaded");
        Ok(board)
      }
      other => Err(BoardError::UnsupportedFormat(other.to_string())),
    }
  }
}
