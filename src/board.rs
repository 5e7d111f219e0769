use std::fmt::{self, Display};

use itertools::{izip, Itertools};
use rand::Rng;
use tracing::trace;

use crate::error::{BoardError, Result};
use crate::rule::{Rule, GAME_OF_LIFE};

/// A single cell. Zero is dead; any other value reads as alive.
///
/// The width matches the 64-bit cell encoding of the save-state format.
pub type Cell = i64;

/// How neighbor lookups behave past the board edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
  /// Cells beyond the edge are permanently dead.
  Bounded,
  /// Both axes wrap, so each edge is adjacent to the opposite one.
  Toroidal,
}

/// Moore neighborhood offsets.
const NEIGHBORS: [(isize, isize); 8] = [
  (-1, -1),
  (0, -1),
  (1, -1),
  (-1, 0),
  (1, 0),
  (-1, 1),
  (0, 1),
  (1, 1),
];

/// A finite Game of Life board with persistent forcing masks.
///
/// The three buffers (`cells`, `life_mask`, `dead_mask`) always share the
/// shape `height x width`, flattened row-major with the origin at the top
/// left. The masks override the transition rule after every generation: a set
/// life-mask entry forces its cell alive, a set dead-mask entry forces it
/// dead. The dead mask wins where both claim the same cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
  width: usize,
  height: usize,
  topology: Topology,
  rule: Rule,
  cells: Vec<Cell>,
  life_mask: Vec<Cell>,
  dead_mask: Vec<Cell>,
}

impl Board {
  /// An all-dead board with all-zero masks.
  pub fn new(width: usize, height: usize, topology: Topology) -> Result<Self> {
    if width == 0 || height == 0 {
      return Err(BoardError::InvalidDimension { width, height });
    }
    Ok(Self {
      width,
      height,
      topology,
      rule: GAME_OF_LIFE,
      cells: vec![0; width * height],
      life_mask: vec![0; width * height],
      dead_mask: vec![0; width * height],
    })
  }

  /// A board where each cell is drawn alive or dead with probability 1/2.
  ///
  /// The generator is injected so embedders and tests control determinism.
  pub fn random<R: Rng>(
    width: usize,
    height: usize,
    topology: Topology,
    rng: &mut R,
  ) -> Result<Self> {
    let mut board = Self::new(width, height, topology)?;
    for cell in &mut board.cells {
      *cell = rng.random_bool(0.5) as Cell;
    }
    Ok(board)
  }

  /// Wraps an existing row-major buffer as the initial population.
  ///
  /// Values are taken verbatim; anything nonzero reads as alive. Masks start
  /// all-zero.
  pub fn from_cells(
    width: usize,
    height: usize,
    topology: Topology,
    cells: Vec<Cell>,
  ) -> Result<Self> {
    if width == 0 || height == 0 {
      return Err(BoardError::InvalidDimension { width, height });
    }
    if cells.len() != width * height {
      return Err(BoardError::ShapeMismatch {
        expected: width * height,
        found: cells.len(),
      });
    }
    Ok(Self {
      width,
      height,
      topology,
      rule: GAME_OF_LIFE,
      cells,
      life_mask: vec![0; width * height],
      dead_mask: vec![0; width * height],
    })
  }

  /// Rebuilds a board from all three buffers at once. Masks are installed
  /// verbatim, without re-running the overlay.
  pub(crate) fn from_parts(
    width: usize,
    height: usize,
    topology: Topology,
    cells: Vec<Cell>,
    life_mask: Vec<Cell>,
    dead_mask: Vec<Cell>,
  ) -> Result<Self> {
    let mut board = Self::from_cells(width, height, topology, cells)?;
    if life_mask.len() != board.cells.len() {
      return Err(BoardError::ShapeMismatch {
        expected: board.cells.len(),
        found: life_mask.len(),
      });
    }
    if dead_mask.len() != board.cells.len() {
      return Err(BoardError::ShapeMismatch {
        expected: board.cells.len(),
        found: dead_mask.len(),
      });
    }
    board.life_mask = life_mask;
    board.dead_mask = dead_mask;
    Ok(board)
  }

  /// Replaces the transition rule. Every constructor starts from B3/S23.
  pub fn with_rule(mut self, rule: Rule) -> Self {
    self.rule = rule;
    self
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn topology(&self) -> Topology {
    self.topology
  }

  pub fn rule(&self) -> Rule {
    self.rule
  }

  /// The whole population, row-major.
  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }

  pub fn life_mask(&self) -> &[Cell] {
    &self.life_mask
  }

  pub fn dead_mask(&self) -> &[Cell] {
    &self.dead_mask
  }

  fn index(&self, x: usize, y: usize) -> Result<usize> {
    if x >= self.width || y >= self.height {
      return Err(BoardError::OutOfRange {
        x,
        y,
        width: self.width,
        height: self.height,
      });
    }
    Ok(y * self.width + x)
  }

  /// Raw cell read. Not wraparound-safe even on a torus; physics queries go
  /// through [`Board::step`].
  pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
    Ok(self.cells[self.index(x, y)?])
  }

  /// Raw cell write.
  pub fn set(&mut self, x: usize, y: usize, value: Cell) -> Result<()> {
    let i = self.index(x, y)?;
    self.cells[i] = value;
    Ok(())
  }

  /// Flips a cell between dead and alive, returning the new value.
  ///
  /// Masks are untouched; a forced cell flips back on the next overlay.
  pub fn toggle(&mut self, x: usize, y: usize) -> Result<Cell> {
    let i = self.index(x, y)?;
    self.cells[i] = (self.cells[i] == 0) as Cell;
    Ok(self.cells[i])
  }

  /// Advances one generation and applies the mask overlay.
  ///
  /// The next population is computed into a fresh buffer before it is
  /// published, so a caller only ever observes whole generations.
  pub fn step(&mut self) {
    let mut next = vec![0; self.cells.len()];
    for y in 0..self.height {
      for x in 0..self.width {
        let alive = self.cells[y * self.width + x] != 0;
        let neighbors = self.live_neighbors(x, y);
        next[y * self.width + x] = self.rule.next(alive, neighbors) as Cell;
      }
    }
    self.cells = next;
    trace!(rule = %self.rule, "generation advanced");
    self.apply_masks();
  }

  fn live_neighbors(&self, x: usize, y: usize) -> u32 {
    let mut count = 0;
    for &(dx, dy) in NEIGHBORS.iter() {
      let nx = x as isize + dx;
      let ny = y as isize + dy;
      let (nx, ny) = match self.topology {
        Topology::Bounded => {
          if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            continue;
          }
          (nx as usize, ny as usize)
        }
        Topology::Toroidal => (
          nx.rem_euclid(self.width as isize) as usize,
          ny.rem_euclid(self.height as isize) as usize,
        ),
      };
      if self.cells[ny * self.width + nx] != 0 {
        count += 1;
      }
    }
    count
  }

  /// Re-applies the forcing masks to the current population.
  ///
  /// Runs automatically after every step and mask replacement. The result is
  /// strictly 0/1: a cell survives only where the dead mask is clear, and is
  /// alive there if it was alive or the life mask claims it.
  pub fn apply_masks(&mut self) {
    for (cell, life, dead) in izip!(&mut self.cells, &self.life_mask, &self.dead_mask) {
      *cell = ((*cell != 0 || *life != 0) && *dead == 0) as Cell;
    }
  }

  /// Replaces the life mask wholesale and re-applies the overlay.
  pub fn set_life_mask(&mut self, mask: Vec<Cell>) -> Result<()> {
    if mask.len() != self.cells.len() {
      return Err(BoardError::ShapeMismatch {
        expected: self.cells.len(),
        found: mask.len(),
      });
    }
    self.life_mask = mask;
    self.apply_masks();
    Ok(())
  }

  /// Replaces the dead mask wholesale and re-applies the overlay.
  pub fn set_dead_mask(&mut self, mask: Vec<Cell>) -> Result<()> {
    if mask.len() != self.cells.len() {
      return Err(BoardError::ShapeMismatch {
        expected: self.cells.len(),
        found: mask.len(),
      });
    }
    self.dead_mask = mask;
    self.apply_masks();
    Ok(())
  }
}

impl Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let art = self
      .cells
      .chunks(self.width)
      .map(|row| {
        row
          .iter()
          .map(|&c| if c != 0 { 'O' } else { '.' })
          .collect::<String>()
      })
      .join("\n");
    write!(f, "{}", art)
  }
}
