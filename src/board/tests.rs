use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::X.opponent(), Stone::O);
    assert_eq!(Stone::O.opponent(), Stone::X);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(1, 1); // Center
    assert_eq!(pos.to_index(), 4);

    let pos2 = Pos::from_index(7);
    assert_eq!(pos2.row, 2);
    assert_eq!(pos2.col, 1);

    for idx in 0..TOTAL_CELLS {
        assert_eq!(Pos::from_index(idx).to_index(), idx);
    }
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(2, 2));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(3, 0));
    assert!(!Pos::is_valid(0, 3));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 3);
    assert_eq!(TOTAL_CELLS, 9);
    assert_eq!(Bitboard::FULL.bits(), 0x1FF);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 2) < Pos::new(1, 0));
}

#[test]
fn test_encode_grid_masks() {
    use Stone::{Empty as E, O, X};
    let grid = [[X, O, X], [O, X, E], [E, E, X]];
    let board = Board::from_grid(&grid);

    // bits 0, 2, 4, 8
    assert_eq!(board.x.bits(), 0b1_0001_0101);
    // bits 1, 3
    assert_eq!(board.o.bits(), 0b0_0000_1010);
    assert!(!board.x.intersects(board.o));
    assert_eq!(board.to_grid(), grid);
}

#[test]
fn test_encode_symbols_treats_unknown_as_empty() {
    let grid = [['X', 'O', '_'], ['?', 'X', ' '], ['O', '.', 'X']];
    let board = Board::from_symbols(&grid, 'X', 'O');

    assert_eq!(board.x.count(), 3);
    assert_eq!(board.o.count(), 2);
    assert!(board.is_empty(Pos::new(0, 2)));
    assert!(board.is_empty(Pos::new(1, 0)));
    assert!(board.is_empty(Pos::new(2, 1)));
}

#[test]
fn test_encode_symbols_custom_markers() {
    let grid = [[1u8, 0, 0], [0, 2, 0], [0, 0, 0]];
    let board = Board::from_symbols(&grid, 1, 2);
    assert_eq!(board.get(Pos::new(0, 0)), Stone::X);
    assert_eq!(board.get(Pos::new(1, 1)), Stone::O);
    assert_eq!(board.stone_count(), 2);
}

#[test]
fn test_place_remove_roundtrip() {
    let mut board = Board::new();
    board.place_stone(Pos::new(0, 0), Stone::X);
    board.place_stone(Pos::new(2, 1), Stone::O);
    let before = board;

    board.place_stone(Pos::new(1, 1), Stone::X);
    assert_ne!(board, before);
    board.remove_stone(Pos::new(1, 1));
    assert_eq!(board, before);
}

#[test]
fn test_empty_cells_mask() {
    let mut board = Board::new();
    assert_eq!(board.empty_cells(), Bitboard::FULL);

    board.place_stone(Pos::new(1, 1), Stone::X);
    board.place_stone(Pos::new(0, 0), Stone::O);
    let empties: Vec<Pos> = board.empty_cells().iter_ones().collect();
    assert_eq!(empties.len(), 7);
    assert!(!empties.contains(&Pos::new(1, 1)));
    assert!(!empties.contains(&Pos::new(0, 0)));
    // Ascending index order
    assert_eq!(empties[0], Pos::new(0, 1));
}

#[test]
fn test_board_display() {
    let mut board = Board::new();
    board.place_stone(Pos::new(0, 0), Stone::X);
    board.place_stone(Pos::new(0, 1), Stone::O);
    let text = board.to_string();
    assert!(text.starts_with(" X | O |   \n"));
    assert_eq!(text.lines().count(), 5);
}
