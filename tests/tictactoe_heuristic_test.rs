//! Tests for the opponent heuristic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_arbiter::{Board, CENTER, Side, choose_opponent_move, completing_cell};

#[test]
fn test_blocks_human_line() {
    // Human threatens 0-1-2; opponent holds 4 and 8 with no line of its own.
    let board = Board::from_cells(&[0, 1, 3], &[4, 8]);
    assert_eq!(completing_cell(&board, Side::Opponent), None);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(choose_opponent_move(&board, &mut rng), Some(2));
}

#[test]
fn test_prefers_own_win_over_block() {
    // Human threatens 6 (column 0-3-6); opponent can finish 1-4-7.
    let board = Board::from_cells(&[0, 3, 8], &[1, 4]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(choose_opponent_move(&board, &mut rng), Some(7));
}

#[test]
fn test_takes_center_on_open_board() {
    for opening in [0, 1, 2, 3, 5, 6, 7, 8] {
        let board = Board::from_cells(&[opening], &[]);
        let mut rng = StdRng::seed_from_u64(opening as u64);
        assert_eq!(choose_opponent_move(&board, &mut rng), Some(CENTER));
    }
}

#[test]
fn test_first_pattern_in_table_order_wins_ties() {
    // Opponent can finish row 0-1-2 (at 2) or column 0-3-6 (at 6).
    let board = Board::from_cells(&[4, 5, 7], &[0, 1, 3]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(choose_opponent_move(&board, &mut rng), Some(2));
}

#[test]
fn test_always_returns_free_cell() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let mut human = Vec::new();
        let mut opponent = Vec::new();
        loop {
            let board = Board::from_cells(&human, &opponent);
            let finished = board.is_full()
                || board.has_won(Side::Human)
                || board.has_won(Side::Opponent);
            if finished {
                break;
            }
            let free = board.available_cells();
            human.push(free[rng.random_range(0..free.len())]);

            let board = Board::from_cells(&human, &opponent);
            let finished = board.is_full()
                || board.has_won(Side::Human)
                || board.has_won(Side::Opponent);
            if finished {
                break;
            }
            let cell = choose_opponent_move(&board, &mut rng).expect("board is open");
            assert!(!board.is_occupied(cell), "{cell} taken on {board:?}");
            opponent.push(cell);
        }
    }
}
