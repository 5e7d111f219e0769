//! Plaintext pattern files.
//!
//! One text row per board row, `O` for a live cell and `.` for a dead one;
//! lines starting with `!` are comments and blank lines are skipped. This is
//! the conventional `.cells` layout used by pattern collections.

use itertools::Itertools;
use regex::Regex;
use tracing::debug;

use crate::board::{Board, Cell, Topology};
use crate::error::{BoardError, Result};

/// Reads a pattern into a fresh board; dimensions come from the text.
///
/// All rows must be the same length. Masks start all-zero.
pub fn read(src: impl AsRef<str>, topology: Topology) -> Result<Board> {
  let mut rows: Vec<Vec<Cell>> = vec![];
  let mut width = 0;

  for (line_no, line) in src.as_ref().lines().enumerate() {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('!') {
      continue;
    }

    let mut row = Vec::with_capacity(line.len());
    for c in line.chars() {
      match c {
        'O' => row.push(1),
        '.' => row.push(0),
        _ => {
          return Err(BoardError::MalformedPattern {
            line: line_no + 1,
            reason: format!("unexpected character {:?}", c),
          });
        }
      }
    }

    if rows.is_empty() {
      width = row.len();
    } else if row.len() != width {
      return Err(BoardError::MalformedPattern {
        line: line_no + 1,
        reason: format!("row holds {} cells, previous rows hold {}", row.len(), width),
      });
    }
    rows.push(row);
  }

  let height = rows.len();
  if width == 0 || height == 0 {
    return Err(BoardError::InvalidDimension { width, height });
  }

  debug!(width, height, "pattern parsed");
  Board::from_cells(width, height, topology, rows.concat())
}

/// Writes the population as pattern text; masks are not represented.
pub fn write(board: &Board) -> String {
  let mut out = board
    .cells()
    .chunks(board.width())
    .map(|row| {
      row
        .iter()
        .map(|&c| if c != 0 { 'O' } else { '.' })
        .collect::<String>()
    })
    .join("\n");
  out.push('\n');
  out
}

/// The `!Name: …` header comment, if the pattern carries one.
pub fn name(src: impl AsRef<str>) -> Option<String> {
  let re = Regex::new(r"(?m)^!\s*Name\s*:\s*(\S.*?)\s*$").ok()?;
  re.captures(src.as_ref())
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
}
