use serde::{Deserialize, Serialize};

/// One addressable position on the square puzzle board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

/// Side length of the board for a perfect-square piece count.
/// Callers guarantee `difficulty` is a perfect square (4, 9, 16, 25...).
pub fn side_len(difficulty: usize) -> usize {
    let side = (difficulty as f64).sqrt().round() as usize;
    debug_assert_eq!(side * side, difficulty);
    side
}

/// Map a linear slot index to its board position.
pub fn index_to_pos(index: usize, side: usize) -> GridPos {
    GridPos {
        row: index / side,
        col: index % side,
    }
}

/// Map a board position back to its linear slot index.
pub fn pos_to_index(pos: GridPos, side: usize) -> usize {
    pos.row * side + pos.col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_len_of_perfect_squares() {
        assert_eq!(side_len(4), 2);
        assert_eq!(side_len(9), 3);
        assert_eq!(side_len(16), 4);
        assert_eq!(side_len(25), 5);
    }

    #[test]
    fn index_round_trips_through_pos() {
        for side in [2usize, 3, 4, 5] {
            for i in 0..side * side {
                let pos = index_to_pos(i, side);
                assert!(pos.row < side && pos.col < side);
                assert_eq!(pos_to_index(pos, side), i);
            }
        }
    }

    #[test]
    fn index_to_pos_walks_row_major() {
        assert_eq!(index_to_pos(0, 3), GridPos { row: 0, col: 0 });
        assert_eq!(index_to_pos(2, 3), GridPos { row: 0, col: 2 });
        assert_eq!(index_to_pos(3, 3), GridPos { row: 1, col: 0 });
        assert_eq!(index_to_pos(8, 3), GridPos { row: 2, col: 2 });
    }
}
