use std::fs;

use pretty_assertions::assert_eq;

use flatlife::{cells, Topology};

#[test]
fn glider_laps_the_torus() {
  let src = fs::read_to_string("tests/fixtures/glider.cells").unwrap();
  assert_eq!(cells::name(&src), Some("Glider".to_string()));

  let mut board = cells::read(&src, Topology::Toroidal).unwrap();
  let start = cells::write(&board);

  // One cell down-right per 4 generations: 32 generations on an 8x8 torus
  // is a full lap back to the starting cells.
  for _ in 0..32 {
    board.step();
  }

  assert_eq!(cells::write(&board), start);
}

#[test]
fn wall_hugging_blinker_needs_the_wrap() {
  // A vertical blinker flush against the left edge. On the torus the wrap
  // supplies its missing arm and it oscillates with period 2; in the box the
  // arm falls off the edge and the oscillator starves.
  let src = "\
.....
O....
O....
O....
.....
";

  let mut torus = cells::read(src, Topology::Toroidal).unwrap();
  for _ in 0..4 {
    torus.step();
  }
  assert_eq!(cells::write(&torus), src);

  let mut boxed = cells::read(src, Topology::Bounded).unwrap();
  for _ in 0..4 {
    boxed.step();
  }
  assert!(boxed.cells().iter().all(|&c| c == 0));
}

#[test]
fn glider_phases_match_the_textbook() {
  let phase_0 = "\
.O...
..O..
OOO..
.....
.....
";
  let phase_4 = "\
.....
..O..
...O.
.OOO.
.....
";

  let mut board = cells::read(phase_0, Topology::Toroidal).unwrap();
  for _ in 0..4 {
    board.step();
  }

  assert_eq!(cells::write(&board), phase_4);
}
