use serde::{Deserialize, Serialize};

/// Scoring contract: monotonic non-decreasing in `solved`, non-increasing in
/// `elapsed_secs` for a fixed solved count. The exact curve is a pluggable
/// configuration, not core logic.
pub trait ScoreEngine {
    fn score(&self, solved: u32, total: u32, elapsed_secs: u32) -> u32;
}

/// Default linear curve: points per solved piece, a flat completion bonus,
/// and a per-second penalty clamped at zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WeightedScore {
    pub points_per_piece: u32,
    pub completion_bonus: u32,
    pub time_penalty_per_sec: u32,
}

impl Default for WeightedScore {
    fn default() -> Self {
        WeightedScore {
            points_per_piece: 100,
            completion_bonus: 200,
            time_penalty_per_sec: 1,
        }
    }
}

impl ScoreEngine for WeightedScore {
    fn score(&self, solved: u32, total: u32, elapsed_secs: u32) -> u32 {
        let base = solved * self.points_per_piece;
        let bonus = if total > 0 && solved == total {
            self.completion_bonus
        } else {
            0
        };
        (base + bonus).saturating_sub(elapsed_secs.saturating_mul(self.time_penalty_per_sec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_decreasing_in_solved_count() {
        let s = WeightedScore::default();
        let mut last = 0;
        for solved in 0..=9 {
            let v = s.score(solved, 9, 30);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn non_increasing_in_elapsed_time() {
        let s = WeightedScore::default();
        let mut last = u32::MAX;
        for secs in [0, 1, 10, 100, 10_000] {
            let v = s.score(5, 9, secs);
            assert!(v <= last);
            last = v;
        }
    }

    #[test]
    fn penalty_clamps_at_zero() {
        let s = WeightedScore::default();
        assert_eq!(s.score(1, 4, 1_000_000), 0);
    }

    #[test]
    fn completion_bonus_only_on_full_board() {
        let s = WeightedScore::default();
        assert_eq!(s.score(4, 4, 0) - s.score(3, 4, 0), s.points_per_piece + s.completion_bonus);
    }
}
