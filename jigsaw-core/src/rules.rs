use serde::{Deserialize, Serialize};

use crate::score::WeightedScore;

pub const PROBE_RADIUS_DEFAULT: f64 = 10.0;

/// Session-wide options. `debug_mode` and `hints_enabled` are read by the
/// feedback/render layer, never branched on by the core state machine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GameRules {
    pub debug_mode: bool,
    pub hints_enabled: bool,
    /// Radius in canvas pixels for the touch-release fallback probes.
    pub probe_radius: f64,
    pub score: WeightedScore,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            debug_mode: false,
            hints_enabled: false,
            probe_radius: PROBE_RADIUS_DEFAULT,
            score: WeightedScore::default(),
        }
    }
}
