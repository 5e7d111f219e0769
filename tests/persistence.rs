use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use flatlife::{Board, BoardError, Topology};

#[test]
fn save_and_open_round_trip_through_disk() {
  let mut rng = StdRng::seed_from_u64(7);
  let mut board = Board::random(12, 9, Topology::Toroidal, &mut rng).unwrap();

  let mut life = vec![0; 12 * 9];
  life[5] = 1;
  life[100] = 1;
  let mut dead = vec![0; 12 * 9];
  dead[5] = 1;
  board.set_life_mask(life).unwrap();
  board.set_dead_mask(dead).unwrap();
  board.step();

  let path = std::env::temp_dir().join("flatlife_roundtrip.json");
  board.save(&path).unwrap();
  let restored = Board::open(&path).unwrap();
  fs::remove_file(&path).unwrap();

  assert_eq!(restored, board);
}

#[test]
fn open_reads_pattern_files_as_bounded_boards() {
  let board = Board::open("tests/fixtures/glider.cells").unwrap();
  assert_eq!(board.width(), 8);
  assert_eq!(board.height(), 8);
  assert_eq!(board.topology(), Topology::Bounded);
  assert_eq!(board.cells().iter().sum::<i64>(), 5);
}

#[test]
fn open_refuses_other_extensions() {
  let err = Board::open("tests/fixtures/glider.rle").unwrap_err();
  assert!(matches!(err, BoardError::UnsupportedFormat(ext) if ext == "rle"));
}

#[test]
fn stepping_a_restored_board_matches_stepping_the_original() {
  let mut rng = StdRng::seed_from_u64(99);
  let mut original = Board::random(16, 16, Topology::Bounded, &mut rng).unwrap();

  let mut restored = Board::restore(&original.save_state().unwrap()).unwrap();
  for _ in 0..10 {
    original.step();
    restored.step();
  }

  assert_eq!(restored, original);
}
