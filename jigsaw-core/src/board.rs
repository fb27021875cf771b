use crate::grid::{index_to_pos, pos_to_index, side_len};
use crate::piece::{Piece, PieceId};

/// Owns the piece pool and the slot array (one entry per grid position).
///
/// Invariants upheld by every mutation:
/// - a piece is in the unplaced pool xor referenced by exactly one slot;
/// - if a slot references a piece, that piece's `current` matches the slot
///   and its `placed` flag is set.
#[derive(Clone, Debug, Default)]
pub struct Board {
    side: usize,
    pieces: Vec<Piece>,
    slots: Vec<Option<PieceId>>,
}

impl Board {
    /// Build a board sized for the given piece list. The list comes
    /// unshuffled from the image-slicing collaborator; piece ids must equal
    /// their index.
    pub fn new(pieces: Vec<Piece>) -> Self {
        let difficulty = pieces.len();
        let side = if difficulty == 0 { 0 } else { side_len(difficulty) };
        debug_assert!(pieces.iter().enumerate().all(|(i, p)| p.id == i));
        Board {
            side,
            slots: vec![None; difficulty],
            pieces,
        }
    }

    pub fn difficulty(&self) -> usize {
        self.slots.len()
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id]
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn slot(&self, index: usize) -> Option<PieceId> {
        self.slots[index]
    }

    /// Pieces still waiting in the tray, in id order.
    pub fn unplaced(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| !p.placed)
    }

    /// Drop `id` onto `index`. Move semantics: the piece's previous slot is
    /// cleared first, and any different occupant of the target is evicted
    /// back to the pool before the dragged piece takes the slot.
    /// Returns the evicted occupant, if any.
    pub fn place(&mut self, id: PieceId, index: usize) -> Option<PieceId> {
        debug_assert!(index < self.slots.len());
        if let Some(prev) = self.pieces[id].current {
            let prev_index = pos_to_index(prev, self.side);
            if self.slots[prev_index] == Some(id) {
                self.slots[prev_index] = None;
            }
        }
        let evicted = match self.slots[index] {
            Some(other) if other != id => {
                self.reset_to_pool(other);
                Some(other)
            }
            _ => None,
        };
        let pos = index_to_pos(index, self.side);
        let piece = &mut self.pieces[id];
        piece.current = Some(pos);
        piece.placed = true;
        piece.solved = piece.correct_at(pos);
        self.slots[index] = Some(id);
        evicted
    }

    /// Pure placement check against the piece's current slot. Unplaced
    /// pieces are never correct.
    pub fn placement_correct(&self, id: PieceId) -> bool {
        let piece = &self.pieces[id];
        piece.current.is_some_and(|pos| piece.correct_at(pos))
    }

    /// Clear a slot, returning its occupant to the unplaced pool.
    pub fn clear_slot(&mut self, index: usize) -> Option<PieceId> {
        let id = self.slots[index].take()?;
        self.reset_to_pool(id);
        Some(id)
    }

    fn reset_to_pool(&mut self, id: PieceId) {
        let piece = &mut self.pieces[id];
        piece.current = None;
        piece.placed = false;
        piece.solved = false;
    }

    /// Number of pieces sitting in their correct slot.
    pub fn solved_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.solved).count()
    }

    pub fn is_complete(&self) -> bool {
        self.difficulty() > 0 && self.solved_count() == self.difficulty()
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(id) = slot {
                let p = &self.pieces[*id];
                assert!(p.placed);
                assert_eq!(p.current, Some(index_to_pos(i, self.side)));
            }
        }
        for p in &self.pieces {
            match p.current {
                Some(pos) => {
                    assert!(p.placed);
                    assert_eq!(self.slots[pos_to_index(pos, self.side)], Some(p.id));
                }
                None => assert!(!p.placed && !p.solved),
            }
        }
        // No two slots may reference the same piece.
        let mut seen = vec![false; self.pieces.len()];
        for id in self.slots.iter().flatten() {
            assert!(!seen[*id], "piece {id} referenced by two slots");
            seen[*id] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceVariant;

    fn board(difficulty: usize) -> Board {
        Board::new(Piece::grid(difficulty, PieceVariant::Simple))
    }

    #[test]
    fn place_into_empty_slot() {
        let mut b = board(4);
        assert_eq!(b.place(2, 2), None);
        assert_eq!(b.slot(2), Some(2));
        assert!(b.piece(2).placed);
        assert!(b.piece(2).solved);
        assert!(b.placement_correct(2));
        b.check_invariants();
    }

    #[test]
    fn wrong_slot_is_placed_but_not_solved() {
        let mut b = board(4);
        b.place(0, 3);
        assert!(b.piece(0).placed);
        assert!(!b.piece(0).solved);
        assert!(!b.placement_correct(0));
        assert_eq!(b.solved_count(), 0);
        b.check_invariants();
    }

    #[test]
    fn moving_a_piece_clears_its_old_slot() {
        let mut b = board(4);
        b.place(1, 0);
        b.place(1, 1);
        assert_eq!(b.slot(0), None);
        assert_eq!(b.slot(1), Some(1));
        b.check_invariants();
    }

    #[test]
    fn dropping_onto_an_occupied_slot_evicts_the_occupant() {
        let mut b = board(4);
        b.place(1, 0);
        let evicted = b.place(2, 0);
        assert_eq!(evicted, Some(1));
        assert_eq!(b.slot(0), Some(2));
        let p1 = b.piece(1);
        assert!(!p1.placed);
        assert!(!p1.solved);
        assert_eq!(p1.current, None);
        b.check_invariants();
    }

    #[test]
    fn re_dropping_onto_the_same_slot_is_not_an_eviction() {
        let mut b = board(4);
        b.place(3, 3);
        assert_eq!(b.place(3, 3), None);
        assert_eq!(b.slot(3), Some(3));
        b.check_invariants();
    }

    #[test]
    fn eviction_round_trip_loses_no_piece() {
        let mut b = board(4);
        // B sits in A's way; dropping A evicts B, then B settles at home.
        b.place(1, 0);
        b.place(0, 0);
        b.place(1, 1);
        assert_eq!(b.slot(0), Some(0));
        assert_eq!(b.slot(1), Some(1));
        assert_eq!(b.solved_count(), 2);
        b.check_invariants();
    }

    #[test]
    fn clear_slot_returns_the_piece_to_the_pool() {
        let mut b = board(9);
        b.place(4, 4);
        assert_eq!(b.clear_slot(4), Some(4));
        assert_eq!(b.clear_slot(4), None);
        assert!(!b.piece(4).placed);
        assert_eq!(b.unplaced().count(), 9);
        b.check_invariants();
    }

    #[test]
    fn complete_only_when_every_piece_is_home() {
        let mut b = board(4);
        for i in 0..3 {
            b.place(i, i);
            assert!(!b.is_complete());
        }
        b.place(3, 3);
        assert!(b.is_complete());
        b.check_invariants();
    }
}
