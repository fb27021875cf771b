use jigsaw_core::PuzzleEvent;

use crate::log;
use crate::state::State;

/// Route core feedback events to the non-core collaborators: haptics for a
/// wrong drop, a short buzz pattern on completion, the console for debug
/// events. Vibration is best-effort; an absent API is simply skipped.
pub fn dispatch(state: &State, events: &[PuzzleEvent]) {
    for event in events {
        match event {
            PuzzleEvent::CorrectDrop(_) => {}
            PuzzleEvent::IncorrectDrop(_) => {
                let _ = state.window.navigator().vibrate_with_duration(60);
            }
            PuzzleEvent::Completed { score, seconds } => {
                let _ = state.window.navigator().vibrate_with_duration(200);
                log(&format!("puzzle complete: score {score}, {seconds}s"));
            }
            PuzzleEvent::Debug(msg) => log(msg),
        }
    }
}
