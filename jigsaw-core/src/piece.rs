use serde::{Deserialize, Serialize};

use crate::grid::{GridPos, index_to_pos, side_len};

/// Stable piece identifier, assigned at puzzle creation and never reused
/// within a session.
pub type PieceId = usize;

/// Where the piece's image tile comes from. Affects image slicing only,
/// never placement logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceVariant {
    /// Tile cut from a user-supplied image.
    Custom,
    /// Tile cut from a bundled preset image.
    Simple,
}

/// A movable unit corresponding to one tile of the source image.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    /// The piece's true destination, fixed at creation.
    pub correct: GridPos,
    /// Slot currently occupied, or `None` while in the unplaced pool.
    pub current: Option<GridPos>,
    /// True once dropped onto any slot, correct or not.
    pub placed: bool,
    /// True only while `current` matches `correct`.
    pub solved: bool,
    pub variant: PieceVariant,
}

impl Piece {
    /// Build the initial, unshuffled piece list for a board of `difficulty`
    /// slots. The image-slicing collaborator hands this straight to
    /// [`crate::Session::start`].
    pub fn grid(difficulty: usize, variant: PieceVariant) -> Vec<Piece> {
        let side = side_len(difficulty);
        (0..difficulty)
            .map(|id| Piece {
                id,
                correct: index_to_pos(id, side),
                current: None,
                placed: false,
                solved: false,
                variant,
            })
            .collect()
    }

    /// Pure placement check: would this piece be correct at `pos`?
    pub fn correct_at(&self, pos: GridPos) -> bool {
        self.correct == pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pieces_start_in_the_pool() {
        let pieces = Piece::grid(9, PieceVariant::Simple);
        assert_eq!(pieces.len(), 9);
        for (i, p) in pieces.iter().enumerate() {
            assert_eq!(p.id, i);
            assert_eq!(p.correct, index_to_pos(i, 3));
            assert!(p.current.is_none());
            assert!(!p.placed);
            assert!(!p.solved);
        }
    }

    #[test]
    fn correct_at_ignores_unrelated_state() {
        let mut p = Piece::grid(4, PieceVariant::Custom)[3];
        let home = GridPos { row: 1, col: 1 };
        assert!(p.correct_at(home));
        // Moving the piece elsewhere never changes the answer.
        p.current = Some(GridPos { row: 0, col: 0 });
        p.placed = true;
        assert!(p.correct_at(home));
        assert!(!p.correct_at(GridPos { row: 0, col: 1 }));
    }
}
