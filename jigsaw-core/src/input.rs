use crate::piece::PieceId;

/// Coordinate-to-slot lookup supplied by the rendering layer, so the
/// touch-release search stays platform-agnostic and unit-testable.
pub trait SlotResolver {
    /// Slot index of the grid cell under the point, if any.
    fn resolve_slot_at(&self, x: f64, y: f64) -> Option<usize>;
}

/// Probe directions around a missed release point, in priority order:
/// left, right, up, down, then the four diagonals.
const PROBE_OFFSETS: [(f64, f64); 8] = [
    (-1.0, 0.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (-1.0, -1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (1.0, 1.0),
];

/// Resolve the slot under `(x, y)`, widening to eight offset points at
/// `radius` when the exact coordinate misses. Finger-sized release points
/// frequently land a few pixels outside the intended cell; the exact lookup
/// alone misses far more often than this search.
pub fn hit_test(resolver: &dyn SlotResolver, x: f64, y: f64, radius: f64) -> Option<usize> {
    if let Some(slot) = resolver.resolve_slot_at(x, y) {
        return Some(slot);
    }
    PROBE_OFFSETS
        .iter()
        .find_map(|&(dx, dy)| resolver.resolve_slot_at(x + dx * radius, y + dy * radius))
}

/// Live state of a touch-emulated drag. At most one drag session exists at
/// a time; `dragging` implies `piece` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchDrag {
    pub piece: Option<PieceId>,
    /// Finger-to-piece offset captured at drag start.
    pub offset: (f64, f64),
    /// Live finger coordinates, updated on every move event.
    pub drag_pos: (f64, f64),
    pub dragging: bool,
}

/// Result of releasing a touch drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchRelease {
    /// The search found a cell; feed `(piece, slot)` to the placement path.
    Hit { piece: PieceId, slot: usize },
    /// No probe landed in a cell: a no-op, not an error.
    Miss { piece: PieceId },
    /// No drag was active.
    Idle,
}

/// Normalizes pointer drags and touch drags into `(piece, slot)` placement
/// requests. States: idle -> dragging -> dropped | cancelled.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputController {
    pointer_piece: Option<PieceId>,
    touch: TouchDrag,
    /// Cell under the finger during a touch move; highlight only.
    hover_slot: Option<usize>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while either modality has a drag in flight.
    pub fn active(&self) -> bool {
        self.pointer_piece.is_some() || self.touch.dragging
    }

    pub fn touch(&self) -> &TouchDrag {
        &self.touch
    }

    pub fn hover_slot(&self) -> Option<usize> {
        self.hover_slot
    }

    /// The piece currently held by either modality.
    pub fn dragged_piece(&self) -> Option<PieceId> {
        self.pointer_piece.or(self.touch.piece.filter(|_| self.touch.dragging))
    }

    /// Pointer modality: drag start. Ignored while another drag is active.
    pub fn pointer_down(&mut self, piece: PieceId) {
        if !self.active() {
            self.pointer_piece = Some(piece);
        }
    }

    /// Pointer modality: the drop target carries its own slot index, so a
    /// single authoritative lookup suffices and no search runs.
    pub fn pointer_drop(&mut self, slot: Option<usize>) -> Option<(PieceId, usize)> {
        let piece = self.pointer_piece.take()?;
        Some((piece, slot?))
    }

    pub fn pointer_cancel(&mut self) {
        self.pointer_piece = None;
    }

    /// Touch modality: capture the piece, the finger-to-piece offset and the
    /// starting coordinates. Ignored while another drag is active.
    pub fn touch_start(&mut self, piece: PieceId, offset: (f64, f64), pos: (f64, f64)) {
        if self.active() {
            return;
        }
        self.touch = TouchDrag {
            piece: Some(piece),
            offset,
            drag_pos: pos,
            dragging: true,
        };
        self.hover_slot = None;
    }

    /// Touch modality: track the finger and recompute the highlighted cell.
    /// No placement mutation happens here.
    pub fn touch_move(&mut self, pos: (f64, f64), resolver: &dyn SlotResolver) {
        if !self.touch.dragging {
            return;
        }
        self.touch.drag_pos = pos;
        self.hover_slot = resolver.resolve_slot_at(pos.0, pos.1);
    }

    /// Touch modality: the authoritative release. Runs the widened hit-test
    /// search and resets the drag state either way.
    pub fn touch_end(&mut self, resolver: &dyn SlotResolver, probe_radius: f64) -> TouchRelease {
        if !self.touch.dragging {
            return TouchRelease::Idle;
        }
        let piece = match self.touch.piece {
            Some(p) => p,
            None => {
                self.reset_touch();
                return TouchRelease::Idle;
            }
        };
        let (x, y) = self.touch.drag_pos;
        let release = match hit_test(resolver, x, y, probe_radius) {
            Some(slot) => TouchRelease::Hit { piece, slot },
            None => TouchRelease::Miss { piece },
        };
        self.reset_touch();
        release
    }

    pub fn touch_cancel(&mut self) {
        self.reset_touch();
    }

    fn reset_touch(&mut self) {
        self.touch = TouchDrag::default();
        self.hover_slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted resolver: axis-aligned cells with recorded probe order.
    struct CellMap {
        cells: Vec<(f64, f64, f64, f64, usize)>,
        probes: RefCell<Vec<(f64, f64)>>,
    }

    impl CellMap {
        fn new(cells: Vec<(f64, f64, f64, f64, usize)>) -> Self {
            CellMap {
                cells,
                probes: RefCell::new(Vec::new()),
            }
        }
    }

    impl SlotResolver for CellMap {
        fn resolve_slot_at(&self, x: f64, y: f64) -> Option<usize> {
            self.probes.borrow_mut().push((x, y));
            self.cells
                .iter()
                .find(|(x0, y0, x1, y1, _)| x >= *x0 && x < *x1 && y >= *y0 && y < *y1)
                .map(|&(_, _, _, _, slot)| slot)
        }
    }

    #[test]
    fn exact_hit_needs_no_probes() {
        let map = CellMap::new(vec![(0.0, 0.0, 50.0, 50.0, 7)]);
        assert_eq!(hit_test(&map, 25.0, 25.0, 10.0), Some(7));
        assert_eq!(map.probes.borrow().len(), 1);
    }

    #[test]
    fn fallback_prefers_earlier_offsets() {
        // Exact point misses; cells sit both left and below the release
        // point, and the left probe must win because it is ordered first.
        let map = CellMap::new(vec![
            (0.0, 0.0, 40.0, 100.0, 3),   // left of the release point
            (40.0, 55.0, 100.0, 100.0, 5), // below it
        ]);
        assert_eq!(hit_test(&map, 45.0, 50.0, 10.0), Some(3));
    }

    #[test]
    fn fallback_reaches_diagonals_last() {
        let map = CellMap::new(vec![(52.0, 52.0, 100.0, 100.0, 1)]);
        // Only the down-right diagonal probe (45+10, 45+10) lands inside.
        assert_eq!(hit_test(&map, 45.0, 45.0, 10.0), Some(1));
        // Exact + 8 offsets, diagonal order: down-right is probed last.
        assert_eq!(map.probes.borrow().len(), 9);
    }

    #[test]
    fn full_miss_resolves_to_none() {
        let map = CellMap::new(vec![(100.0, 100.0, 200.0, 200.0, 0)]);
        // 15px outside the cell with a 10px radius: every probe misses.
        assert_eq!(hit_test(&map, 85.0, 85.0, 10.0), None);
    }

    #[test]
    fn touch_lifecycle_emits_a_single_request() {
        let map = CellMap::new(vec![(0.0, 0.0, 50.0, 50.0, 2)]);
        let mut input = InputController::new();
        input.touch_start(4, (3.0, 5.0), (200.0, 200.0));
        assert!(input.active());
        input.touch_move((20.0, 20.0), &map);
        assert_eq!(input.hover_slot(), Some(2));
        assert_eq!(
            input.touch_end(&map, 10.0),
            TouchRelease::Hit { piece: 4, slot: 2 }
        );
        assert!(!input.active());
        assert_eq!(input.touch_end(&map, 10.0), TouchRelease::Idle);
    }

    #[test]
    fn touch_miss_is_a_cancel() {
        let map = CellMap::new(vec![]);
        let mut input = InputController::new();
        input.touch_start(1, (0.0, 0.0), (5.0, 5.0));
        assert_eq!(input.touch_end(&map, 10.0), TouchRelease::Miss { piece: 1 });
        assert!(!input.active());
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut input = InputController::new();
        input.pointer_down(0);
        input.touch_start(1, (0.0, 0.0), (0.0, 0.0));
        assert!(!input.touch.dragging);
        input.pointer_down(2);
        assert_eq!(input.pointer_drop(Some(3)), Some((0, 3)));
    }

    #[test]
    fn pointer_drop_outside_any_cell_cancels() {
        let mut input = InputController::new();
        input.pointer_down(6);
        assert_eq!(input.pointer_drop(None), None);
        assert!(!input.active());
    }
}
