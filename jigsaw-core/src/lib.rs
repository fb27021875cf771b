pub mod board;
pub mod grid;
pub mod input;
pub mod piece;
pub mod rules;
pub mod score;
pub mod session;

pub use board::Board;
pub use grid::{GridPos, index_to_pos, pos_to_index, side_len};
pub use input::{InputController, SlotResolver, TouchDrag, TouchRelease, hit_test};
pub use piece::{Piece, PieceId, PieceVariant};
pub use rules::{GameRules, PROBE_RADIUS_DEFAULT};
pub use score::{ScoreEngine, WeightedScore};
pub use session::{PlacementOutcome, PuzzleEvent, Session, SessionStatus};
